use clap::Args;
use serde::{Deserialize, Serialize};
use simple_error::{SimpleResult, bail};

#[derive(Args, Default, Deserialize, Serialize)]
pub struct SharedSettings {
    /// Number of threads to use. Defaults to all logical cpus detected.
    #[arg(long = "threads", value_name = "THREAD_COUNT")]
    thread_count_option: Option<usize>,

    /// This value will be filled in by thread_count_option
    #[arg(skip)]
    pub thread_count: usize,

    /// Overwrite an existing output directory
    #[arg(long)]
    pub clobber: bool,

    /// Turn on extra debug logging
    ///
    /// This option enables per-breakend debug logging of the alternate path search. It is
    /// recommended (but not required) to set --threads to 1 when this is enabled.
    ///
    #[arg(long)]
    pub debug: bool,
}

pub fn validate_and_fix_shared_settings(
    mut settings: SharedSettings,
) -> SimpleResult<SharedSettings> {
    settings.thread_count = match settings.thread_count_option {
        Some(count) => {
            if count == 0 {
                bail!("--threads argument must be greater than 0");
            }
            count
        }
        None => num_cpus::get(),
    };

    Ok(settings)
}
