pub mod naive_scanner;
pub mod ring_scanner;
pub mod scanner_factory;
