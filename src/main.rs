use clap::{Parser, Subcommand};
use pddl_ground::{Domain, Grounder, ParserConfig, PddlError, Plan, Problem, Verbosity};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(version)]
/// Parse, re-serialize and ground PDDL tasks.
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(help = "The PDDL domain file")]
    domain: PathBuf,
    #[arg(
        help = "A TOML file with parser options",
        short = 'C',
        long = "config",
        id = "CONFIG"
    )]
    config: Option<PathBuf>,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour")]
    colour: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse the domain, and optionally a problem, and print a summary.
    Check {
        #[arg(help = "The PDDL problem instance file")]
        problem: Option<PathBuf>,
    },
    /// Write the domain, and optionally a problem, back as PDDL.
    Render {
        #[arg(help = "The PDDL problem instance file")]
        problem: Option<PathBuf>,
        #[arg(
            help = "Keep only the most likely outcome of probabilistic effects",
            short = 'd',
            long = "determinize"
        )]
        determinize: bool,
        #[arg(
            help = "Where to write the domain, stdout if omitted",
            long = "domain-output",
            id = "DOMAIN_OUTPUT"
        )]
        domain_output: Option<PathBuf>,
        #[arg(
            help = "Where to write the problem, stdout if omitted",
            long = "problem-output",
            id = "PROBLEM_OUTPUT"
        )]
        problem_output: Option<PathBuf>,
    },
    /// Resolve every step of a plan to its ground action predicate.
    Ground {
        #[arg(help = "The PDDL problem instance file")]
        problem: PathBuf,
        #[arg(help = "The plan file to ground")]
        plan: PathBuf,
        #[arg(
            help = "Print fully instantiated operators instead of action predicates",
            short = 'i',
            long = "instantiate"
        )]
        instantiate: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level: tracing::Level = cli.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(cli.colour)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PddlError> {
    let config = match &cli.config {
        Some(path) => ParserConfig::from_path(path)?,
        None => ParserConfig::default(),
    };
    let domain = Domain::from_path(&cli.domain, &config)?;
    info!(
        domain = %domain.name(),
        types = domain.types().len(),
        predicates = domain.predicates().len(),
        operators = domain.operators().len(),
        probabilistic = domain.is_probabilistic(),
        "parsed domain"
    );

    match cli.command {
        Commands::Check { problem } => {
            if let Some(path) = problem {
                let problem = Problem::from_path(path, &domain)?;
                info!(
                    problem = %problem.name(),
                    objects = problem.objects().len(),
                    facts = problem.initial_state().len(),
                    "parsed problem"
                );
            }
            println!("ok");
        }
        Commands::Render {
            problem,
            determinize,
            domain_output,
            problem_output,
        } => {
            let problem = problem
                .map(|path| Problem::from_path(path, &domain))
                .transpose()?;
            let domain = if determinize {
                domain.determinize()?
            } else {
                domain
            };
            match domain_output {
                Some(path) => domain.write_to(path)?,
                None => println!("{domain}"),
            }
            if let Some(problem) = problem {
                match problem_output {
                    Some(path) => problem.write_to(path, config.problem_layout)?,
                    None => println!("{}", problem.to_pddl(config.problem_layout)),
                }
            }
        }
        Commands::Ground {
            problem,
            plan,
            instantiate,
        } => {
            let problem = Problem::from_path(problem, &domain)?;
            let plan = Plan::from_path(plan)?;
            info!(steps = plan.len(), "parsed plan");
            let grounder = Grounder::new(&domain, &problem);
            for step in plan.steps() {
                if instantiate {
                    let action = grounder.instantiate(step)?;
                    println!("{action}");
                    println!("\t:precondition {}", action.precondition());
                    println!("\t:effect {}", action.effect());
                } else {
                    println!("{}", grounder.ground_step(step)?);
                }
            }
        }
    }
    Ok(())
}
