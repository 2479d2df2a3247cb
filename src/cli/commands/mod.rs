//! CLI command implementations

pub mod check;
pub mod config;
pub mod publish;
pub mod verify;

pub use check::execute as check;
pub use config::execute as config;
pub use publish::execute as publish;
pub use verify::execute as verify;

use console::Emoji;

pub(crate) static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
pub(crate) static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
