mod fakes;

pub use factories::*;
pub use fakes::*;
