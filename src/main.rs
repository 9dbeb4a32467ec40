use clap::{Parser, Subcommand, ValueEnum};
use chomsky_gram::{Grammar, GrammarClass};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Chomsky-hierarchy grammar classifier and simplifier
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the grammar file, one rule per line
    #[arg(help = "Path to the grammar file")]
    grammar_file: Option<PathBuf>,

    /// Grammar class to validate against
    #[arg(short, long, value_enum, default_value_t = ClassArg::ContextFree)]
    class: ClassArg,

    /// Remove unreachable and unproductive nonterminals (context-free only)
    #[arg(long)]
    simplify: bool,

    /// Print the grammar as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an example grammar file
    Example {
        /// Output file path
        #[arg(help = "Output file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ClassArg {
    Unrestricted,
    Noncontracting,
    ContextFree,
    LeftLinear,
    RightLinear,
}

impl From<ClassArg> for GrammarClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Unrestricted => GrammarClass::Unrestricted,
            ClassArg::Noncontracting => GrammarClass::NonContracting,
            ClassArg::ContextFree => GrammarClass::ContextFree,
            ClassArg::LeftLinear => GrammarClass::LeftLinear,
            ClassArg::RightLinear => GrammarClass::RightLinear,
        }
    }
}

const EXAMPLE_GRAMMAR: &str = "\
# Context-free grammar with unreachable (E) and unproductive (A) parts
S -> a
S -> A
A -> AB
B -> b
C -> c
E -> Ff
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(command) = cli.command {
        match command {
            Commands::Example { output } => {
                let output_path =
                    output.unwrap_or_else(|| PathBuf::from("example_grammar.txt"));
                let mut file = File::create(&output_path)?;
                file.write_all(EXAMPLE_GRAMMAR.as_bytes())?;

                println!("Created example grammar at: {}", output_path.display());
                return Ok(());
            }
        }
    }

    let grammar_file = cli.grammar_file.ok_or("Grammar file path required")?;
    let class = GrammarClass::from(cli.class);

    let mut grammar = Grammar::from_file(&grammar_file, class)?;
    println!(
        "Loaded {} grammar with {} rules from {}.",
        grammar.class(),
        grammar.rules().len(),
        grammar_file.display()
    );

    if cli.simplify {
        if class != GrammarClass::ContextFree {
            return Err("--simplify applies to context-free grammars only".into());
        }
        grammar.remove_unreachable();
        grammar.remove_unproductive();
        println!("Simplified down to {} rules.\n", grammar.rules().len());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&grammar)?);
    } else {
        println!("{}", grammar);
    }

    Ok(())
}
