/// Configures `env_logger` for the current process.
///
/// Safe to call more than once; later calls keep the first configuration.
pub fn init_logger(verbose: bool) {
    let _ = env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .try_init();
}
