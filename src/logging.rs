use tracing_subscriber::{fmt, EnvFilter};

/// ログ初期化（標準エラー出力へ。RUST_LOGが優先）
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
