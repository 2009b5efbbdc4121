mod app_data_dir;

pub use app_data_dir::default_data_dir;
