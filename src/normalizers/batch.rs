use super::ingredient::parse_ingredient;
use super::instruction::parse_instruction;
use crate::model::{ParsedIngredient, ParsedInstruction};
use crate::units::UnitResolver;

/// Parses a newline separated block of ingredients, skipping blank lines.
pub fn parse_ingredients(block: &str, units: &dyn UnitResolver) -> Vec<ParsedIngredient> {
    non_blank_lines(block)
        .map(|line| parse_ingredient(line, units))
        .collect()
}

/// Parses a newline separated block of instructions, skipping blank lines.
pub fn parse_instructions(block: &str) -> Vec<ParsedInstruction> {
    non_blank_lines(block).map(parse_instruction).collect()
}

fn non_blank_lines(block: &str) -> impl Iterator<Item = &str> {
    block.lines().filter(|line| !line.trim().is_empty())
}
