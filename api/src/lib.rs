pub mod consts;
pub mod error;
pub mod event;
pub mod factor;
pub mod instruction;
pub mod sdk;
pub mod state;
pub mod utils;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::consts::*;
    pub use crate::error::*;
    pub use crate::event::*;
    pub use crate::factor::*;
    pub use crate::instruction::*;
    pub use crate::sdk::*;
    pub use crate::state::*;
    pub use crate::utils::*;
}

use steel::*;

declare_id!("BQdPJPncTJqUFdUd7FBz87tWgBstixh5XbCNZxnBnCNJ");
