use bid_writer::{cli, client, commands, config, error, session_file};
use bid_writer_common::session::SessionContext;
use clap::Parser;
use cli::{Cli, Commands, StampAction};
use client::HttpClient;
use commands::smart_stamp::SmartStampArgs;
use config::Config;
use error::Result;
use session_file::FileStore;

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("✖ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;

    if let Commands::Config { set_api_url, set_download_dir, show } = cli.command {
        if let Some(url) = set_api_url {
            config.set_api_url(url)?;
            println!("✔ 已设置服务器地址: {}", config.api_url);
        }
        if let Some(dir) = set_download_dir {
            config.download_dir = Some(dir);
            config.save()?;
            println!("✔ 已设置保存目录");
        }
        if show {
            println!("配置:");
            println!("  服务器地址: {}", config.resolve_api_url(cli.api_url.as_deref()));
            println!("  保存目录: {}", config.download_dir().display());
            match config.timeout_seconds {
                Some(secs) => println!("  超时: {}秒", secs),
                None => println!("  超时: 无"),
            }
            println!("  配置文件: {}", Config::config_path()?.display());
        }
        return Ok(());
    }

    let api_url = config.resolve_api_url(cli.api_url.as_deref());
    log::debug!("api url: {}", api_url);
    let session = SessionContext::new(FileStore::new(Config::session_path()?));
    let client = HttpClient::new(&api_url, config.timeout_seconds, session)?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&client, &email, password).await?;
        }

        Commands::Logout => commands::auth::logout(&client).await?,

        Commands::Whoami => commands::auth::whoami(client.session()),

        Commands::Register { email, password } => {
            println!("📝 bid-writer - 注册\n");
            commands::auth::register(&client, &email, password).await?;
        }

        Commands::ForgotPassword { email } => {
            println!("🔑 bid-writer - 找回密码\n");
            commands::auth::forgot_password(&client, &email).await?;
        }

        Commands::Stamp { action } => match action {
            StampAction::List => {
                commands::stamp::list(&client).await?;
            }
            StampAction::Upload { paths } => commands::stamp::upload(&client, &paths).await?,
            StampAction::Delete { ids, yes } => commands::stamp::delete(&client, &ids, yes).await?,
        },

        Commands::Upload { files } => {
            commands::upload::run(&client, &files).await?;
        }

        Commands::SmartStamp { document, stamp_id, stamp_path, stamp_type, width, offset, output } => {
            println!("🖋 bid-writer - 魔法印章\n");
            let args = SmartStampArgs { document, stamp_id, stamp_path, stamp_type, width, offset, output };
            commands::smart_stamp::run(&client, args, &config.download_dir()).await?;
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}
