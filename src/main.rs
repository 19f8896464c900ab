use clap::Parser;
use clap::error::ErrorKind;
use opensips_probe::*;
use std::future::Future;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn init_tracing(level: Option<&str>) {
    // stdout carries the status line; logs go to stderr.
    let filter = match level {
        Some(l) => EnvFilter::try_new(l).unwrap_or_else(|_| EnvFilter::new("warn")),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn emit(message: &str, code: u8) -> ExitCode {
    println!("{}", message);
    ExitCode::from(code)
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Drops `work` (and with it any running child) when a signal arrives.
async fn until_signal<T>(work: impl Future<Output = T>) -> Option<T> {
    tokio::select! {
        result = work => Some(result),
        _ = shutdown_signal() => {
            tracing::warn!("Received shutdown signal, abandoning probe");
            None
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            let report = report::unknown(report::DEFAULT_PREFIX, "invalid command line");
            return emit(&report.message, report.exit_code());
        }
    };
    init_tracing(cli.log_level.as_deref());
    tracing::debug!("{}", version::banner());

    if cli.list_metrics {
        for (id, description) in catalog::entries() {
            println!("{}\t{}", id, description);
        }
        for id in catalog::unsupported() {
            println!("{}\t(unsupported)", id);
        }
        return ExitCode::SUCCESS;
    }

    let config = match config::AppConfig::load(cli.config.as_deref())
        .and_then(|c| c.into_probe_config(cli.overrides()))
    {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "configuration rejected");
            let report =
                report::unknown(report::DEFAULT_PREFIX, &format!("configuration error: {}", e));
            return emit(&report.message, report.exit_code());
        }
    };
    tracing::debug!(command = %config.command, args = ?config.args, "control command configured");

    if let Some(state) = cli.exit_state {
        let report = report::forced(&config.prefix, state);
        return emit(&report.message, report.exit_code());
    }

    if cli.self_test {
        return match until_signal(self_test::run(&config)).await {
            Some(result) => emit(&result.message(&config.prefix), result.exit_code()),
            None => emit(
                &format!("{} SELFTEST FAILED - interrupted", config.prefix),
                self_test::SELF_TEST_FAILURE_CODE,
            ),
        };
    }

    let Some(metric) = cli.metric.as_deref() else {
        let report = report::unknown(&config.prefix, "no metric requested");
        return emit(&report.message, report.exit_code());
    };

    let report = until_signal(probe::run(metric, &config))
        .await
        .unwrap_or_else(|| report::unknown(&config.prefix, "probe interrupted"));
    emit(&report.message, report.exit_code())
}
