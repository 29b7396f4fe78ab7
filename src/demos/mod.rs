//! Runnable example grammars demonstrating the engine on small, complete
//! languages. Not part of the core algebra; kept here the way `lang_pt`
//! ships its own worked JSON example alongside the library.

pub mod boolean_logic;
pub mod calculator;
