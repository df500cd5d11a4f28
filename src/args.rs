pub use clap::Parser;

use crate::scaffold::DEFAULT_TARGET_DIR;

#[derive(Parser)]
#[clap(version)]
pub struct Args {
    /// Directory to create the site in
    #[clap(default_value = DEFAULT_TARGET_DIR)]
    pub directory: String,
}
