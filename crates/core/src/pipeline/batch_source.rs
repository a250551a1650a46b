use std::io::Read;
use std::path::{Path, PathBuf};

use crate::image_io::domain::image_reader::ImageReader;
use crate::image_io::infrastructure::png_stream::{decode_png, PngStreamSplitter};
use crate::pipeline::output_policy;
use crate::shared::constants::{PNG_EXTENSION, STREAM_OUTPUT_STEM};
use crate::shared::raster::Raster;

/// Error type that can cross thread boundaries.
pub type SendError = Box<dyn std::error::Error + Send + Sync>;

/// One unit of batch work: a decoded image (or the reason it could not be
/// loaded) and where its output goes.
pub struct BatchItem {
    pub index: usize,
    /// Human-readable origin, used in log lines.
    pub label: String,
    pub output: PathBuf,
    pub image: Result<Raster, SendError>,
}

/// Produces the images of a batch in order.
pub trait BatchSource: Send {
    /// Number of items, when known up front.
    fn len_hint(&self) -> Option<usize>;

    fn items(&mut self) -> Box<dyn Iterator<Item = BatchItem> + '_>;
}

/// Images read from files given on the command line.
pub struct FileBatchSource {
    files: Vec<PathBuf>,
    out_dir: PathBuf,
    force: bool,
    reader: Box<dyn ImageReader>,
}

impl FileBatchSource {
    pub fn new(
        files: Vec<PathBuf>,
        out_dir: PathBuf,
        force: bool,
        reader: Box<dyn ImageReader>,
    ) -> Self {
        Self {
            files,
            out_dir,
            force,
            reader,
        }
    }

    fn load(&self, index: usize, input: &Path) -> BatchItem {
        let output = output_policy::output_path_for(&self.out_dir, input);
        let image = output_policy::check(input, &output, self.force)
            .map_err(SendError::from)
            .and_then(|()| {
                self.reader
                    .read(input)
                    .map(|raster| raster.with_index(index))
                    .map_err(|e| -> SendError { e.to_string().into() })
            });
        BatchItem {
            index,
            label: input.display().to_string(),
            output,
            image,
        }
    }
}

impl BatchSource for FileBatchSource {
    fn len_hint(&self) -> Option<usize> {
        Some(self.files.len())
    }

    fn items(&mut self) -> Box<dyn Iterator<Item = BatchItem> + '_> {
        Box::new(
            self.files
                .iter()
                .enumerate()
                .map(|(index, input)| self.load(index, input)),
        )
    }
}

/// PNG files concatenated on a byte stream, typically stdin.
///
/// Outputs are named `image-<index>.png` under the output directory and,
/// like file outputs, are only replaced when `force` is set. A malformed
/// stream ends the batch with one failed item.
pub struct StreamBatchSource<R> {
    input: Option<R>,
    out_dir: PathBuf,
    force: bool,
    buffer: Vec<u8>,
}

impl<R: Read + Send> StreamBatchSource<R> {
    pub fn new(input: R, out_dir: PathBuf, force: bool) -> Self {
        Self {
            input: Some(input),
            out_dir,
            force,
            buffer: Vec::new(),
        }
    }
}

impl<R: Read + Send> BatchSource for StreamBatchSource<R> {
    fn len_hint(&self) -> Option<usize> {
        None
    }

    fn items(&mut self) -> Box<dyn Iterator<Item = BatchItem> + '_> {
        // The decoder needs whole files, and file boundaries are only known
        // after walking the chunks, so the stream is buffered first.
        let read_error = self
            .input
            .take()
            .and_then(|mut input| input.read_to_end(&mut self.buffer).err());
        if let Some(e) = read_error {
            let item = BatchItem {
                index: 0,
                label: "stdin".to_string(),
                output: stream_output_path(&self.out_dir, 0),
                image: Err(Box::new(e)),
            };
            return Box::new(std::iter::once(item));
        }

        let out_dir = &self.out_dir;
        let force = self.force;
        Box::new(
            PngStreamSplitter::new(&self.buffer)
                .enumerate()
                .map(move |(index, part)| {
                    let output = stream_output_path(out_dir, index);
                    let image = part.map_err(SendError::from).and_then(|bytes| {
                        output_policy::check_output(&output, force)?;
                        Ok(decode_png(bytes, index)?)
                    });
                    BatchItem {
                        index,
                        label: format!("stdin image {index}"),
                        output,
                        image,
                    }
                }),
        )
    }
}

fn stream_output_path(out_dir: &Path, index: usize) -> PathBuf {
    out_dir.join(format!("{STREAM_OUTPUT_STEM}-{index}.{PNG_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_io::infrastructure::png_file_reader::PngFileReader;
    use crate::pipeline::crop_image_use_case::ProcessError;
    use std::io::Cursor;

    fn encode_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, encode_png(width, height)).unwrap();
        path
    }

    #[test]
    fn test_file_source_decodes_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png", 2, 3);
        let b = write_png(dir.path(), "b.png", 4, 1);
        let out_dir = dir.path().join("out");

        let mut source =
            FileBatchSource::new(vec![a, b], out_dir.clone(), false, Box::new(PngFileReader::new()));
        assert_eq!(source.len_hint(), Some(2));

        let items: Vec<_> = source.items().collect();
        assert_eq!(items.len(), 2);
        let second = items[1].image.as_ref().unwrap();
        assert_eq!((second.width(), second.height()), (4, 1));
        assert_eq!(second.index(), 1);
        assert!(items[1].output.starts_with(&out_dir));
        assert!(items[1].output.ends_with("b.png"));
    }

    #[test]
    fn test_file_source_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_png(dir.path(), "a.png", 1, 1);
        let out_dir = dir.path().join("out");
        let output = output_policy::output_path_for(&out_dir, &input);
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();
        std::fs::write(&output, b"old").unwrap();

        let mut source = FileBatchSource::new(
            vec![input.clone()],
            out_dir.clone(),
            false,
            Box::new(PngFileReader::new()),
        );
        let item = source.items().next().unwrap();
        let err = item.image.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProcessError>(),
            Some(ProcessError::OutputExists(_))
        ));

        let mut forced =
            FileBatchSource::new(vec![input], out_dir, true, Box::new(PngFileReader::new()));
        assert!(forced.items().next().unwrap().image.is_ok());
    }

    #[test]
    fn test_file_source_reports_unreadable_input_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.png");
        std::fs::write(&bad, b"not an image").unwrap();
        let good = write_png(dir.path(), "good.png", 1, 1);

        let mut source = FileBatchSource::new(
            vec![bad, good],
            dir.path().join("out"),
            false,
            Box::new(PngFileReader::new()),
        );
        let items: Vec<_> = source.items().collect();
        assert!(items[0].image.is_err());
        assert!(items[1].image.is_ok());
    }

    #[test]
    fn test_stream_source_names_outputs_by_index() {
        let stream = [encode_png(2, 2), encode_png(3, 1)].concat();
        let mut source = StreamBatchSource::new(Cursor::new(stream), PathBuf::from("out"), false);
        assert_eq!(source.len_hint(), None);

        let items: Vec<_> = source.items().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].output, PathBuf::from("out/image-0.png"));
        assert_eq!(items[1].output, PathBuf::from("out/image-1.png"));
        let second = items[1].image.as_ref().unwrap();
        assert_eq!((second.width(), second.height(), second.index()), (3, 1, 1));
    }

    #[test]
    fn test_stream_source_refuses_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("image-0.png");
        std::fs::write(&existing, b"keep me").unwrap();
        let stream = [encode_png(1, 1), encode_png(2, 1)].concat();

        let mut source =
            StreamBatchSource::new(Cursor::new(stream.clone()), dir.path().to_path_buf(), false);
        let items: Vec<_> = source.items().collect();
        let err = items[0].image.as_ref().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ProcessError>(),
            Some(ProcessError::OutputExists(p)) if p == &existing
        ));
        assert!(items[1].image.is_ok());
        assert_eq!(std::fs::read(&existing).unwrap(), b"keep me");

        let mut forced =
            StreamBatchSource::new(Cursor::new(stream), dir.path().to_path_buf(), true);
        assert!(forced.items().all(|item| item.image.is_ok()));
    }

    #[test]
    fn test_stream_source_ends_with_error_on_garbage() {
        let stream = [encode_png(1, 1), b"garbage".to_vec()].concat();
        let mut source = StreamBatchSource::new(Cursor::new(stream), PathBuf::from("out"), false);

        let items: Vec<_> = source.items().collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].image.is_ok());
        assert!(items[1].image.is_err());
    }

    #[test]
    fn test_empty_stream_has_no_items() {
        let mut source = StreamBatchSource::new(Cursor::new(Vec::new()), PathBuf::from("out"), false);
        assert_eq!(source.items().count(), 0);
    }
}
