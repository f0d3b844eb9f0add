pub mod safe_number;
pub mod sqrt;
