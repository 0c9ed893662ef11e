use std::env;
use std::ffi::OsStr;
use std::io;

use log::{error, info};
use seahorse::{App, Command, Context, Flag, FlagType};

use taeti_report::generate_report;
use taeti_report::input::Config;

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    if let Err(e) = run() {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

mod seahorse_exts {
    use std::path::PathBuf;

    use log::error;
    use seahorse::Context;

    /// Logs the error and terminates, seahorse actions cannot return errors.
    pub fn exit_on_error(result: anyhow::Result<()>) {
        if let Err(e) = result {
            error!("{:?}", e);
            ::std::process::exit(1);
        }
    }

    pub trait ContextExt {
        fn context(&self) -> &Context;

        fn required_string_flag(&self, name: &str) -> Result<String, anyhow::Error> {
            self.context()
                .string_flag(name)
                .map_err(|e| anyhow::anyhow!("missing required flag \"{}\": {:?}", name, e))
        }

        fn required_path_flag(&self, name: &str) -> Result<PathBuf, anyhow::Error> {
            self.required_string_flag(name).map(PathBuf::from)
        }

        fn optional_path_flag(&self, name: &str) -> Option<PathBuf> {
            self.context().string_flag(name).ok().map(PathBuf::from)
        }
    }

    impl ContextExt for Context {
        fn context(&self) -> &Context {
            self
        }
    }
}

use seahorse_exts::{exit_on_error, ContextExt};

fn build_config(context: &Context) -> anyhow::Result<Config> {
    let path = context.required_path_flag("config")?;
    let mut config = Config::try_from_toml_file(&path)?;

    if let Some(issues) = context.optional_path_flag("issues") {
        config.issues(issues);
    }

    if let Some(log) = context.optional_path_flag("log") {
        config.log(log);
    }

    if context.bool_flag("no-color") {
        config.color(false);
    }

    let config = config.build()?;

    info!("finished building config");

    Ok(config)
}

fn report(context: &Context) -> anyhow::Result<()> {
    let config = build_config(context)?;

    generate_report(&config, io::stdout().lock())
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let report_command = Command::new("report")
        .usage(format!("{} report --config <path> [args]", args[0]))
        .description("Prints the time of the log grouped by project, task and issue.")
        .flag(Flag::new("config", FlagType::String).description("Path to the config file."))
        .flag(
            Flag::new("issues", FlagType::String)
                .description("[optional] Path to the issue table. Default: `issues` of the config"),
        )
        .flag(
            Flag::new("log", FlagType::String)
                .description("[optional] Path to the time log. Default: `log` of the config"),
        )
        .flag(
            Flag::new("no-color", FlagType::Bool)
                .description("[optional] Prints the report without colors. Default: false"),
        )
        .action(|context: &Context| exit_on_error(report(context)));

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [args]", args[0]))
        .command(report_command);

    app.run(args);

    Ok(())
}
