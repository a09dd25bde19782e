//! Line-level text normalizers. All of them are pure functions of their input.

mod batch;
mod fractions;
mod ingredient;
mod instruction;

pub use batch::{parse_ingredients, parse_instructions};
pub use fractions::normalize_fractions;
pub use ingredient::parse_ingredient;
pub use instruction::parse_instruction;
