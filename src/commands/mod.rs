pub mod generate;
pub mod list;
pub mod run;

pub use generate::{GenerateParams, execute_generate};
pub use list::execute_list;
pub use run::execute_run;
