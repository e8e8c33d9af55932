use std::path::PathBuf;

use clap::{Parser, Subcommand};
use conceptforge_core::mode::GenerationMode;
use conceptforge_core::request::{DEFAULT_COMIC_STRIP_STYLE, DEFAULT_PANEL_COUNT};

#[derive(Debug, Parser)]
#[command(name = "conceptforge")]
#[command(about = "Concept Forge - AI-assisted superhero concept development")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory to save the generated files into
    #[arg(short, long, global = true)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Pitch a new hero or villain from a one-line idea
    Character {
        /// Core idea, e.g. "a hacker who controls electricity"
        idea: String,
    },

    /// Outline three episodes for a hero, villain and theme
    Plot {
        #[arg(long)]
        hero: String,

        #[arg(long)]
        villain: String,

        #[arg(long)]
        theme: String,
    },

    /// Define a visual style guide
    Style {
        /// Art direction, e.g. "gritty neo-noir"
        direction: String,
    },

    /// Compile an intelligence briefing on an existing character
    Intel {
        /// Character name
        character: String,
    },

    /// Render a single piece of concept art
    ConceptArt {
        prompt: String,
    },

    /// Render a multi-panel comic strip
    ComicStrip {
        scenario: String,

        /// Number of panels (2, 3 or 4)
        #[arg(long, default_value_t = DEFAULT_PANEL_COUNT)]
        panels: u8,

        /// Art style
        #[arg(long, default_value = DEFAULT_COMIC_STRIP_STYLE)]
        style: String,
    },

    /// Generate a short cinematic video shot
    VideoShot {
        prompt: String,
    },
}

impl Command {
    pub fn mode(&self) -> GenerationMode {
        match self {
            Command::Character { .. } => GenerationMode::Character,
            Command::Plot { .. } => GenerationMode::Plot,
            Command::Style { .. } => GenerationMode::Style,
            Command::Intel { .. } => GenerationMode::Intel,
            Command::ConceptArt { .. } => GenerationMode::ConceptArt,
            Command::ComicStrip { .. } => GenerationMode::ComicStrip,
            Command::VideoShot { .. } => GenerationMode::VideoShot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("conceptforge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn subcommand_names_match_mode_ids() {
        let cases: Vec<(&[&str], GenerationMode)> = vec![
            (&["character", "x"][..], GenerationMode::Character),
            (&["plot", "--hero", "a", "--villain", "b", "--theme", "c"][..], GenerationMode::Plot),
            (&["style", "x"][..], GenerationMode::Style),
            (&["intel", "x"][..], GenerationMode::Intel),
            (&["concept-art", "x"][..], GenerationMode::ConceptArt),
            (&["comic-strip", "x"][..], GenerationMode::ComicStrip),
            (&["video-shot", "x"][..], GenerationMode::VideoShot),
        ];
        for (args, mode) in cases {
            assert_eq!(parse(args).command.mode(), mode);
            assert_eq!(args[0], mode.as_str());
        }
    }

    #[test]
    fn comic_strip_defaults() {
        let cli = parse(&["comic-strip", "a heist"]);
        assert_eq!(
            cli.command,
            Command::ComicStrip {
                scenario: "a heist".into(),
                panels: 2,
                style: "Classic Comic".into(),
            }
        );
        assert_eq!(cli.out_dir, None);
    }

    #[test]
    fn out_dir_is_global() {
        let cli = parse(&["video-shot", "a chase", "--out-dir", "renders"]);
        assert_eq!(cli.out_dir, Some(PathBuf::from("renders")));
    }

    #[test]
    fn plot_requires_all_roles() {
        let err = Cli::try_parse_from(["conceptforge", "plot", "--hero", "a"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
