pub mod png_file_reader;
pub mod png_file_writer;
pub mod png_stream;
