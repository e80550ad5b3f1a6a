//! `argtree-demo`: a small "thing" manager built on argtree.

use argtree_cli::{CliError, DefaultErrorHandler, ErrorHandler, Runner, RunnerConfig, builtin};
use argtree_core::{
    ApplicationInfo, Argument, Command, Constructor, ConstructorArgs, EnumType, HandlerFuture,
    Invocation, Object, Param, TypeDescriptor, ValidationError, Value,
};
use tracing::debug;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

fn point_type() -> TypeDescriptor {
    TypeDescriptor::constructed(Constructor::new(
        "Point",
        vec![
            Param::new("x", TypeDescriptor::float()),
            Param::new("y", TypeDescriptor::float()),
        ],
        |args: &ConstructorArgs| {
            let x = args.require("x")?.as_f64().unwrap_or_default();
            let y = args.require("y")?.as_f64().unwrap_or_default();
            Ok(Object::new("Point", Point { x, y }))
        },
    ))
}

fn build_app() -> Result<Command, ValidationError> {
    let priority = EnumType::new("Priority", ["Low", "Normal", "High"]);

    let create = Command::builder("create")
        .display_name("Create")
        .description("Create a thing")
        .alias("new")
        .argument(
            Argument::new("title", TypeDescriptor::string())
                .with_display_name("Title")
                .with_description("Title of the thing")
                .with_short('t')
                .at_position(0),
        )
        .argument(
            Argument::new("description", TypeDescriptor::string())
                .with_display_name("Description")
                .with_alias("desc")
                .with_default(""),
        )
        .argument(
            Argument::new("priority", TypeDescriptor::enumeration(priority))
                .with_display_name("Priority")
                .with_short('p')
                .with_default(Value::Enum("Normal".to_string())),
        )
        .argument(
            Argument::new("tags", TypeDescriptor::list(TypeDescriptor::string()))
                .with_display_name("Tags")
                .optional(),
        )
        .argument(
            Argument::new(
                "meta",
                TypeDescriptor::map(TypeDescriptor::string(), TypeDescriptor::integer()),
            )
            .with_display_name("Metadata")
            .optional(),
        )
        .argument(
            Argument::new("draft", TypeDescriptor::bool())
                .with_display_name("Draft")
                .with_default(false),
        )
        .handler(run_create)
        .help_command(builtin::help_command()?)
        .build()?;

    let remove = Command::builder("remove")
        .display_name("Remove")
        .description("Remove a thing")
        .alias("rm")
        .argument(
            Argument::new("title", TypeDescriptor::string())
                .with_display_name("Title")
                .at_position(0),
        )
        .async_handler(run_remove)
        .help_command(builtin::help_command()?)
        .build()?;

    let place = Command::builder("move")
        .display_name("Move")
        .description("Move a thing to a point")
        .argument(
            Argument::new("title", TypeDescriptor::string())
                .with_display_name("Title")
                .at_position(0),
        )
        .argument(
            Argument::new("to", point_type())
                .with_display_name("Destination")
                .with_description("x,y or x=..,y=.."),
        )
        .handler(run_move)
        .help_command(builtin::help_command()?)
        .build()?;

    Command::builder("thing")
        .display_name("Thing")
        .description("Manage things")
        .application(
            ApplicationInfo::new(PACKAGE_VERSION)
                .with_author("argtree contributors")
                .with_copyright("MIT"),
        )
        .subcommand(create)
        .subcommand(remove)
        .subcommand(place)
        .subcommand(builtin::version_command()?)
        .subcommand(builtin::info_command()?)
        .help_command(builtin::help_command()?)
        .build()
}

fn run_create(invocation: Invocation<'_>) -> anyhow::Result<()> {
    let title = invocation.value("title").map(Value::to_string).unwrap_or_default();
    let priority = invocation.value("priority").and_then(Value::as_enum).unwrap_or("Normal");
    println!("Created '{title}' ({priority})");

    if let Some(description) = invocation.value("description").and_then(Value::as_str) {
        if !description.is_empty() {
            println!("  description: {description}");
        }
    }
    if let Some(tags) = invocation.value("tags") {
        println!("  tags: {tags}");
    }
    if let Some(meta) = invocation.value("meta") {
        println!("  meta: {meta}");
    }
    if invocation.value("draft").and_then(Value::as_bool) == Some(true) {
        println!("  draft");
    }
    Ok(())
}

fn run_remove(invocation: Invocation<'_>) -> HandlerFuture<'_> {
    Box::pin(async move {
        let title = invocation.value("title").map(Value::to_string).unwrap_or_default();
        println!("Removed '{title}'");
        Ok(())
    })
}

fn run_move(invocation: Invocation<'_>) -> anyhow::Result<()> {
    let title = invocation.value("title").map(Value::to_string).unwrap_or_default();
    let Some(point) = invocation.value("to").and_then(Value::downcast_ref::<Point>) else {
        anyhow::bail!("destination is not a point");
    };
    println!("Moved '{title}' to ({}, {})", point.x, point.y);
    Ok(())
}

fn init_tracing(config: &RunnerConfig) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();
}

fn main() {
    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: failed to load config: {err}");
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let tokens: Vec<String> = std::env::args().skip(1).collect();
    debug!(?tokens, "Starting");

    let code = match build_app() {
        Ok(root) => match Runner::new(root).with_config(config).run(&tokens) {
            Ok(code) => code,
            Err(err) => {
                eprintln!("error: {err}");
                1
            }
        },
        Err(err) => {
            DefaultErrorHandler::from_config(&config).handle(&CliError::from(err));
            config.error_exit_code
        }
    };

    std::process::exit(code);
}
