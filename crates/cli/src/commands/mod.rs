pub mod case;
pub mod input;
pub mod print;
pub mod records;
pub mod util;

pub use case::*;
pub use input::*;
pub use print::*;
pub use records::*;
pub use util::*;
