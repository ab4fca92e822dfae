//! The CLI interface for xrandr-menu
//!
//! Use the `--help` flag to see the available options.
use color_eyre::eyre::{Result, eyre};
use structopt::StructOpt;
use xrandr_menu::{
    Action, ActionError, ActionResolver, Config, DEFAULT_PROMPT, DmenuSelector, Outcome, Selector,
    Topology, TopologyError, XrandrRunner, query_status,
};

/// CLI arguments
#[derive(StructOpt, Debug)]
#[structopt(
    name = "xrandr-menu",
    about = "Activate, deactivate and reconfigure display outputs from a dmenu prompt."
)]
struct Opts {
    /// Output debug info
    #[structopt(short, long)]
    verbose: bool,
}

/// Entry point for `xrandr-menu`.
fn main() -> Result<()> {
    let _ = color_eyre::install()?;

    let opts = Opts::from_args();

    let log_level = if opts.verbose {
        log::LevelFilter::Trace
    } else {
        log::LevelFilter::Info
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    )
    .init();

    log::debug!("Parsed Opts:\n{:#?}", opts);

    let config = Config::load()?;
    let runner = XrandrRunner::new();

    let status = query_status(&runner)?;
    let topology = Topology::from_status(&status)?;
    log::debug!("Discovered outputs:\n{}", topology);

    let selector = DmenuSelector::new(config.menu);
    let resolver = ActionResolver::new(&selector, &runner);

    // One menu entry per legal action of each connected output
    let mut entries: Vec<(String, usize, Action)> = Vec::new();
    for output in topology.connected_outputs() {
        for action in output.available_actions()? {
            entries.push((output.describe_action(action), output.index(), action));
        }
    }

    let labels: Vec<String> = entries.iter().map(|(label, ..)| label.clone()).collect();
    let Some(selection) = selector.select(DEFAULT_PROMPT, &labels, labels.len())? else {
        log::debug!("No action selected");
        return Ok(());
    };

    let (_, index, action) = entries
        .iter()
        .find(|(label, ..)| *label == selection)
        .ok_or_else(|| eyre!("Selection `{}` does not match an action", selection))?;
    let output = topology
        .get(*index)
        .ok_or_else(|| eyre!("Output with index {} not found", index))?;

    match resolver.execute(&topology, &output, *action) {
        Ok(Outcome::Applied) => log::info!("Display settings changed"),
        Ok(Outcome::Cancelled) => log::debug!("Action cancelled"),
        Err(ActionError::Topology(TopologyError::LastActiveOutput(name))) => {
            println!("You don't want to deactivate the last active output ({name})");
        }
        Err(err) => Err(err)?,
    }

    Ok(())
}
