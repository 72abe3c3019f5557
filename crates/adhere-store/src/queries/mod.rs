//! SQL operations on the habit_models table.

pub mod model_crud;
