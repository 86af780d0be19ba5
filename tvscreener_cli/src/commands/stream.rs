use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Args;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tvscreener_lib::{Client, StreamOptions};

use super::scan::QueryArgs;
use crate::output::{print_result, OutputFormat, ResultColumns};

#[derive(Args)]
pub struct StreamArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Milliseconds between polls (minimum 1000)
    #[arg(long, default_value = "5000")]
    pub interval_ms: u64,

    /// Stop after this many polls (default: run until interrupted)
    #[arg(long)]
    pub iterations: Option<u64>,
}

impl StreamArgs {
    fn options(&self) -> StreamOptions {
        let mut options =
            StreamOptions::default().with_interval(Duration::from_millis(self.interval_ms));
        if let Some(n) = self.iterations {
            options = options.with_max_iterations(n);
        }
        options
    }
}

pub async fn run(args: &StreamArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let query = args.query.to_query()?;
    let columns = ResultColumns::new(&query.fields());
    let options = args.options();

    let pb = match options.max_iterations {
        Some(n) => {
            let pb = ProgressBar::new(n);
            pb.set_style(ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )?);
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::with_template("[{elapsed_precise}] {spinner} {pos} polls {msg}")?);
            pb
        }
    };
    pb.set_message(format!(
        "polling every {}s",
        options.effective_interval().as_secs_f64()
    ));

    let mut failed = 0u64;
    let stream = query.stream(client, options);
    futures::pin_mut!(stream);

    while let Some(item) = stream.next().await {
        pb.inc(1);
        match item {
            Some(result) => {
                pb.suspend(|| -> Result<()> {
                    eprintln!(
                        "[{}] {} of {} results",
                        Local::now().format("%H:%M:%S"),
                        result.data.len(),
                        result.total_count
                    );
                    print_result(&result, &columns, format)
                })?;
            }
            None => {
                failed += 1;
                pb.println(format!(
                    "  Warning: poll {} failed; waiting for the next one",
                    pb.position()
                ));
            }
        }
    }

    pb.finish_with_message(format!("done, {} failed polls", failed));
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: StreamArgs,
    }

    #[test]
    fn interval_is_clamped() {
        let cli = TestCli::parse_from(["stream", "forex", "--interval-ms", "200", "--iterations", "3"]);
        let options = cli.args.options();
        assert_eq!(options.max_iterations, Some(3));
        assert_eq!(options.effective_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn unbounded_by_default() {
        let cli = TestCli::parse_from(["stream", "stock"]);
        let options = cli.args.options();
        assert_eq!(options.max_iterations, None);
        assert_eq!(options.effective_interval(), Duration::from_millis(5000));
    }
}
