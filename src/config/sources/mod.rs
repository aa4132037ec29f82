pub mod data_dir_file;
pub mod environment;
