mod assemble;
mod check;
mod clean;
mod config;
mod dist;
mod explode;
mod init;

pub use assemble::AssembleArgs;
pub use assemble::handle_assemble;
pub use check::CheckArgs;
pub use check::handle_check;
pub use clean::CleanArgs;
pub use clean::handle_clean;
pub use config::ConfigArgs;
pub use config::handle_config;
pub use dist::DistArgs;
pub use dist::handle_dist;
pub use explode::ExplodeArgs;
pub use explode::handle_explode;
pub use init::InitArgs;
pub use init::handle_init;
