//! # Voice Commands Module
//!
//! Keyword dispatch for speech transcripts. A [`VoiceCommandSet`] is an
//! ordered rule list owned by the caller's session: the first command (in
//! list order, then keyword order) whose keyword occurs in the lower-cased
//! transcript wins.

use log::{debug, info};
use serde::{Deserialize, Serialize};

/// What the interface should do when a command is recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceAction {
    FilterVeg,
    FilterNonVeg,
    OpenDietPlanner,
    OpenAiChat,
    ToggleTheme,
    FocusSearch,
    OpenHomeMedicine,
}

/// A named command and the keywords that trigger it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceCommand {
    pub key: String,
    /// Stored lower-case
    pub keywords: Vec<String>,
    pub action: VoiceAction,
    pub description: String,
}

impl VoiceCommand {
    pub fn new(key: &str, keywords: &[&str], action: VoiceAction, description: &str) -> Self {
        Self {
            key: key.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            action,
            description: description.to_string(),
        }
    }

    fn matches(&self, transcript: &str) -> bool {
        self.keywords.iter().any(|k| transcript.contains(k.as_str()))
    }
}

/// Ordered command list plus the listening state of one recognition session
#[derive(Debug, Clone, Default)]
pub struct VoiceCommandSet {
    commands: Vec<VoiceCommand>,
    listening: bool,
}

impl VoiceCommandSet {
    pub fn new(commands: Vec<VoiceCommand>) -> Self {
        Self {
            commands,
            listening: false,
        }
    }

    /// The stock commands for recipe browsing
    ///
    /// Non-vegetarian rules come first: "non vegetarian" contains
    /// "vegetarian".
    pub fn common() -> Self {
        Self::new(vec![
            VoiceCommand::new(
                "showNonVegRecipes",
                &["show non veg", "non vegetarian", "meat recipes"],
                VoiceAction::FilterNonVeg,
                "Show non-vegetarian recipes",
            ),
            VoiceCommand::new(
                "showVegRecipes",
                &["show veg", "vegetarian", "veg recipes"],
                VoiceAction::FilterVeg,
                "Show vegetarian recipes",
            ),
            VoiceCommand::new(
                "openDietPlanner",
                &["open diet", "diet planner", "meal schedule"],
                VoiceAction::OpenDietPlanner,
                "Open diet scheduler",
            ),
            VoiceCommand::new(
                "openAIChat",
                &["open ai", "chat", "recipe bot"],
                VoiceAction::OpenAiChat,
                "Open AI chat",
            ),
            VoiceCommand::new(
                "toggleTheme",
                &["dark mode", "light mode", "toggle theme", "switch theme"],
                VoiceAction::ToggleTheme,
                "Toggle dark/light mode",
            ),
            VoiceCommand::new(
                "searchRecipes",
                &["search", "find recipe", "look for"],
                VoiceAction::FocusSearch,
                "Search recipes",
            ),
            VoiceCommand::new(
                "openHomeMedicine",
                &["home medicine", "medicine", "natural remedies", "ayurveda"],
                VoiceAction::OpenHomeMedicine,
                "Open home medicine section",
            ),
        ])
    }

    /// Append a rule; it has the lowest precedence
    pub fn push(&mut self, command: VoiceCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[VoiceCommand] {
        &self.commands
    }

    pub fn start_listening(&mut self) {
        if !self.listening {
            info!("Voice command listening started");
            self.listening = true;
        }
    }

    pub fn stop_listening(&mut self) {
        if self.listening {
            info!("Voice command listening stopped");
            self.listening = false;
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Resolve a final transcript to the first matching command
    pub fn dispatch(&self, transcript: &str) -> Option<&VoiceCommand> {
        let transcript = transcript.to_lowercase();
        let command = self.commands.iter().find(|c| c.matches(&transcript));

        match command {
            Some(command) => info!("Executing voice command: {}", command.description),
            None => debug!("Voice command not recognized: {transcript}"),
        }
        command
    }
}
