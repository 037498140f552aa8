use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qidata")]
#[command(about = "Annotate raw data files with typed metadata", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the annotations of a file
    Show {
        file: PathBuf,

        /// Print the serialized records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report the annotation version of one or more files
    Detect {
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Add an annotation to a file
    Add(AnnotationArgs),

    /// Remove an annotation from a file
    #[command(alias = "rm")]
    Remove(AnnotationArgs),

    /// Get or set configuration
    Config {
        /// Configuration key (sidecar-ext, annotator)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct AnnotationArgs {
    pub file: PathBuf,

    /// Metadata type (e.g. Property, Person, Face)
    #[arg(short = 't', long = "type")]
    pub type_name: String,

    /// Annotator id (defaults to the configured annotator)
    #[arg(short, long)]
    pub annotator: Option<String>,

    /// Field of the object, repeatable (e.g. --field key=color)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,

    /// Location as JSON (e.g. '[[0, 0], [10, 80]]')
    #[arg(short, long)]
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_repeated_fields() {
        let cli = Cli::parse_from([
            "qidata", "add", "photo.jpg", "--type", "Property", "-f", "key=k", "-f", "value=v",
            "--location", "[[0,0],[1,1]]",
        ]);
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(args.type_name, "Property");
        assert_eq!(args.fields, vec!["key=k", "value=v"]);
        assert_eq!(args.location.as_deref(), Some("[[0,0],[1,1]]"));
        assert_eq!(args.annotator, None);
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["qidata", "detect", "a.jpg", "b.wav", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Detect { ref files } if files.len() == 2));
    }

    #[test]
    fn detect_needs_a_file() {
        assert!(Cli::try_parse_from(["qidata", "detect"]).is_err());
    }
}
