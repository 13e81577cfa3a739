mod load;
mod record;

pub use load::load_records;
pub use record::Record;
