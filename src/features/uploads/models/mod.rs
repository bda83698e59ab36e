mod upload;

pub use upload::{NewUpload, Upload};
