pub mod shared {
    pub mod bounding_box;
    pub mod constants;
    pub mod point;
    pub mod raster;
}

pub mod scanning {
    pub mod domain {
        pub mod alpha_classifier;
        pub mod boundary_scanner;
        pub mod pixel_source;
        pub mod ring_schedule;
    }
    pub mod infrastructure;
}

pub mod cropping {
    pub mod domain {
        pub mod cropper;
        pub mod padding;
    }
}

pub mod image_io {
    pub mod domain {
        pub mod image_reader;
        pub mod image_writer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod batch_executor;
    pub mod batch_logger;
    pub mod batch_source;
    pub mod crop_image_use_case;
    pub mod output_policy;
    pub mod infrastructure {
        pub mod threaded_batch_executor;
    }
}
