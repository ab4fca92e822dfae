use thiserror::Error;

use crate::exec::{ExecError, Executor, XRANDR};
use crate::menu::{MenuError, Selector};
use crate::topology::{Output, Topology, TopologyError};
use crate::types::{Action, RelativePosition, Resolution};

/// Error type for action resolution
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Error in the display topology")]
    Topology(#[from] TopologyError),
    #[error("Error while prompting for a selection")]
    Menu(#[from] MenuError),
    #[error("Error while running the configuration command")]
    Exec(#[from] ExecError),
    #[error("Selection `{0}` is not one of the offered choices")]
    InvalidSelection(String),
}

type Result<T = ()> = std::result::Result<T, ActionError>;

/// How an action run ended
///
/// Cancelling at any prompt is a normal early exit, not an error; nothing is
/// executed and the topology is left untouched.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Cancelled,
}

/// Resolves a chosen action into a configuration command and executes it
///
/// Sub-selections (placement, resolution) go through the selector; the
/// topology is only updated after the command exited successfully.
pub struct ActionResolver<'a, S, E> {
    selector: &'a S,
    executor: &'a E,
}

impl<'a, S: Selector, E: Executor> ActionResolver<'a, S, E> {
    pub fn new(selector: &'a S, executor: &'a E) -> Self {
        Self { selector, executor }
    }

    /// Executes one user-chosen action end to end
    pub fn execute(&self, topology: &Topology, output: &Output, action: Action) -> Result<Outcome> {
        match action {
            Action::Activate => self.activate(topology, output),
            Action::Deactivate => self.deactivate(output),
            Action::ChangeResolution => self.change_resolution(output),
        }
    }

    /// Activates `output`, asking where to place it when other outputs are
    /// already active
    fn activate(&self, topology: &Topology, output: &Output) -> Result<Outcome> {
        let anchors: Vec<Output> = topology
            .active_outputs()
            .filter(|active| active.index() != output.index())
            .collect();

        let mut args = vec![
            XRANDR.to_string(),
            "--output".to_string(),
            output.name().to_string(),
            "--auto".to_string(),
        ];

        if !anchors.is_empty() {
            let Some((position, anchor)) = self.select_position(&anchors)? else {
                return Ok(Outcome::Cancelled);
            };
            args.push(position.flag().to_string());
            args.push(anchor);
        }

        self.executor.run(&args)?;
        output.record_activated();
        log::info!("Activated output {}", output.name());
        Ok(Outcome::Applied)
    }

    /// Asks where to place a new output relative to the active ones
    fn select_position(&self, anchors: &[Output]) -> Result<Option<(RelativePosition, String)>> {
        let mut pairs = Vec::new();
        for anchor in anchors {
            for position in RelativePosition::ALL {
                pairs.push((position, anchor.name().to_string()));
            }
        }

        let choices: Vec<String> = pairs
            .iter()
            .map(|(position, name)| format!("{} {}", position.label(), name))
            .collect();

        let Some(selection) = self.selector.select("Where", &choices, choices.len())? else {
            return Ok(None);
        };
        let index = choices
            .iter()
            .position(|choice| *choice == selection)
            .ok_or(ActionError::InvalidSelection(selection))?;

        Ok(Some(pairs.swap_remove(index)))
    }

    /// Deactivates `output`, refusing to turn off the last active one
    fn deactivate(&self, output: &Output) -> Result<Outcome> {
        output.ensure_can_deactivate()?;

        let args = vec![
            XRANDR.to_string(),
            "--output".to_string(),
            output.name().to_string(),
            "--off".to_string(),
        ];

        self.executor.run(&args)?;
        output.record_deactivated();
        log::info!("Deactivated output {}", output.name());
        Ok(Outcome::Applied)
    }

    /// Switches `output` to one of its reported resolutions
    fn change_resolution(&self, output: &Output) -> Result<Outcome> {
        let choices: Vec<String> = output.modes().iter().map(Resolution::to_string).collect();
        let current = output
            .current_mode()
            .map_or_else(|| "auto".to_string(), |mode| mode.to_string());
        let prompt = format!("New resolution (currently {})", current);

        let Some(selection) = self.selector.select(&prompt, &choices, choices.len())? else {
            return Ok(Outcome::Cancelled);
        };

        // The selector resolves to a listed choice already; re-check before
        // handing the value to the configuration tool.
        let resolution: Resolution = selection
            .parse()
            .map_err(|_| ActionError::InvalidSelection(selection.clone()))?;
        if !output.modes().contains(&resolution) {
            return Err(ActionError::InvalidSelection(selection));
        }

        let args = vec![
            XRANDR.to_string(),
            "--output".to_string(),
            output.name().to_string(),
            "--mode".to_string(),
            resolution.to_string(),
        ];

        self.executor.run(&args)?;
        output.record_mode(resolution);
        log::info!("Changed resolution of {} to {}", output.name(), resolution);
        Ok(Outcome::Applied)
    }
}
