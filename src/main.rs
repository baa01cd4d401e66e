//! CLI entry point for agendavet.

mod cli;

use agendavet::api::{ApiClient, SessionListener};
use agendavet::auth::{Access, Session};
use agendavet::brand::{
    invalid_colors, validate_hex_color, BrandApi, BrandContext, BrandService, DocumentSurface,
    LogoUpload, ThemeApplicator, ThemeConfig, ThemeResolver, ThemeStore,
};
use agendavet::config::{initialize_default_global_config, load_config, Config, GlobalConfigInitResult};
use agendavet::logging;
use agendavet::render::Renderer;
use agendavet::storage::{FileStore, KeyValueStore, MemoryStore};
use clap::Parser;
use cli::{BrandCommand, Command, ThemeCommand};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Tells the user to sign in again after a 401 cleared the session.
struct CliSessionListener {
    renderer: Renderer,
}

impl SessionListener for CliSessionListener {
    fn session_expired(&self) {
        self.renderer
            .warn("session expired or was rejected; run `agendavet login` to sign in again");
    }
}

/// Everything a command needs, wired once per process.
struct App {
    renderer: Renderer,
    store: Arc<dyn KeyValueStore>,
    session: Session,
    brand: Arc<dyn BrandApi>,
    context: BrandContext,
    surface: Arc<Mutex<DocumentSurface>>,
}

impl App {
    fn new(config: &Config, renderer: Renderer) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.storage_dir() {
            Some(dir) => Arc::new(FileStore::in_dir(&dir)),
            None => {
                renderer.warn("no config directory found; local state will not persist");
                Arc::new(MemoryStore::new())
            }
        };
        let client = ApiClient::new(&config.api, Arc::clone(&store))
            .with_session_listener(Arc::new(CliSessionListener { renderer }));
        let brand: Arc<dyn BrandApi> = Arc::new(BrandService::new(client.clone()));
        let surface = Arc::new(Mutex::new(DocumentSurface::new()));
        let applicator = ThemeApplicator::new(surface.clone(), ThemeStore::new(Arc::clone(&store)));
        let context = BrandContext::new(ThemeResolver::new(Arc::clone(&brand), applicator));
        Self {
            renderer,
            session: Session::over_http(&client),
            store,
            brand,
            context,
            surface,
        }
    }

    fn stylesheet(&self) -> String {
        match self.surface.lock() {
            Ok(doc) => doc.render_css(),
            Err(poisoned) => poisoned.into_inner().render_css(),
        }
    }

    fn warn_invalid_colors(&self, theme: &ThemeConfig) {
        for key in invalid_colors(theme) {
            self.renderer
                .warn(&format!("{key} is not a #RGB/#RRGGBB color; applied as-is"));
        }
    }

    async fn run(&self, command: Command) -> Result<(), String> {
        match command {
            Command::Init { .. } => Ok(()),
            Command::Theme(cmd) => self.theme_command(cmd).await,
            Command::Brand(cmd) => self.brand_command(cmd).await,
            Command::ValidateColor { values } => self.validate_colors(&values),
            Command::Login { email, password } => self.login(&email, password).await,
            Command::Register(arg) => self.register(&arg.file).await,
            Command::Logout => {
                self.session.logout().map_err(|e| e.to_string())?;
                self.renderer.section("logged out");
                Ok(())
            }
            Command::Whoami => {
                self.whoami();
                Ok(())
            }
        }
    }

    async fn theme_command(&self, cmd: ThemeCommand) -> Result<(), String> {
        match cmd {
            ThemeCommand::Resolve { css } => {
                let resolved = self.context.load().await;
                self.renderer
                    .theme(&format!("active theme ({})", resolved.source), &resolved.theme);
                self.warn_invalid_colors(&resolved.theme);
                self.emit_css(css.as_deref())
            }
            ThemeCommand::Show => {
                match ThemeStore::new(Arc::clone(&self.store)).load() {
                    Some(theme) => self.renderer.theme("last applied theme", &theme),
                    None => self.renderer.warn("no theme has been applied yet"),
                }
                Ok(())
            }
            ThemeCommand::Apply(arg) => {
                let theme: ThemeConfig = read_json(&arg.file)?;
                self.warn_invalid_colors(&theme);
                self.context.update(theme.clone());
                self.renderer.theme("applied theme", &theme);
                self.emit_css(None)
            }
        }
    }

    fn emit_css(&self, target: Option<&Path>) -> Result<(), String> {
        let css = self.stylesheet();
        match target {
            Some(path) => {
                std::fs::write(path, css)
                    .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
                self.renderer.field("stylesheet", &path.display().to_string());
            }
            None => print!("{css}"),
        }
        Ok(())
    }

    async fn brand_command(&self, cmd: BrandCommand) -> Result<(), String> {
        let access = match cmd {
            BrandCommand::List => Access::Authenticated,
            _ => Access::Admin,
        };
        self.session.require(access).map_err(|e| e.to_string())?;

        match cmd {
            BrandCommand::List => {
                let themes = self.brand.list().await.map_err(|e| e.to_string())?;
                if themes.is_empty() {
                    self.renderer.warn("no brand configurations on the server");
                }
                for theme in &themes {
                    self.renderer.theme(theme.display_name(), theme);
                }
            }
            BrandCommand::Create(arg) => {
                let draft = read_theme_draft(&arg.file)?;
                let created = self.brand.create(&draft).await.map_err(|e| e.to_string())?;
                self.renderer.theme("created", &created);
            }
            BrandCommand::Update { id, file } => {
                let draft = read_theme_draft(&file.file)?;
                let updated = self
                    .brand
                    .update(id, &draft)
                    .await
                    .map_err(|e| e.to_string())?;
                self.renderer.theme("updated", &updated);
            }
            BrandCommand::Activate { id } => {
                self.brand.activate(id).await.map_err(|e| e.to_string())?;
                let resolved = self.context.load().await;
                self.renderer
                    .theme(&format!("activated #{id}, now applied ({})", resolved.source), &resolved.theme);
            }
            BrandCommand::Delete { id } => {
                self.brand.delete(id).await.map_err(|e| e.to_string())?;
                self.renderer.section(&format!("deleted brand configuration #{id}"));
            }
            BrandCommand::UploadLogo { id, path } => {
                let logo = LogoUpload::from_path(&path)
                    .await
                    .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
                let updated = self
                    .brand
                    .upload_logo(id, logo)
                    .await
                    .map_err(|e| e.to_string())?;
                self.renderer.theme("logo uploaded", &updated);
            }
        }
        Ok(())
    }

    fn validate_colors(&self, values: &[String]) -> Result<(), String> {
        let mut invalid = 0usize;
        for value in values {
            if validate_hex_color(value) {
                println!("{value}\tvalid");
            } else {
                invalid += 1;
                println!("{value}\tinvalid");
            }
        }
        if invalid > 0 {
            return Err(format!("{invalid} of {} values are not hex colors", values.len()));
        }
        Ok(())
    }

    async fn login(&self, email: &str, password: Option<String>) -> Result<(), String> {
        let password = match password {
            Some(password) => password,
            None => rpassword::prompt_password("Password: ")
                .map_err(|e| format!("failed to read password: {e}"))?,
        };
        self.session
            .login(email, &password)
            .await
            .map_err(|e| format!("login failed: {e}"))?;
        self.whoami();
        Ok(())
    }

    async fn register(&self, file: &Path) -> Result<(), String> {
        let details: serde_json::Value = read_json(file)?;
        let response = self
            .session
            .register_client(&details)
            .await
            .map_err(|e| format!("registration failed: {e}"))?;
        self.renderer.section("client registered");
        if let Some(message) = response.message.as_deref() {
            self.renderer.detail(message);
        }
        if self.session.is_authenticated() {
            self.whoami();
        }
        Ok(())
    }

    fn whoami(&self) {
        if !self.session.is_authenticated() {
            self.renderer.warn("not logged in");
            return;
        }
        self.renderer.section("signed in");
        let Some(user) = self.session.current_user() else {
            self.renderer.detail("no user details stored");
            return;
        };
        for (key, value) in [
            ("nome", user.nome.as_deref()),
            ("email", user.email.as_deref()),
            ("tipo", user.tipo.as_deref()),
        ] {
            if let Some(value) = value {
                self.renderer.field(key, value);
            }
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid JSON in {}: {e}", path.display()))
}

/// Theme drafts sent to the backend must carry well-formed colors.
fn read_theme_draft(path: &Path) -> Result<ThemeConfig, String> {
    let draft: ThemeConfig = read_json(path)?;
    let invalid = invalid_colors(&draft);
    if !invalid.is_empty() {
        return Err(format!(
            "invalid colors in {}: {}",
            path.display(),
            invalid.join(", ")
        ));
    }
    Ok(draft)
}

fn run_init(renderer: &Renderer, force: bool) -> Result<(), String> {
    match initialize_default_global_config(force).map_err(|e| e.to_string())? {
        GlobalConfigInitResult::Created { path } => {
            renderer.section("config created");
            renderer.field("path", &path.display().to_string());
        }
        GlobalConfigInitResult::AlreadyInitialized { path } => {
            renderer.warn(&format!(
                "{} already exists; pass --force to overwrite",
                path.display()
            ));
        }
        GlobalConfigInitResult::Overwritten { path, backup_path } => {
            renderer.section("config overwritten");
            renderer.field("path", &path.display().to_string());
            renderer.field("backup", &backup_path.display().to_string());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    if let Err(e) = logging::setup(!args.no_color) {
        eprintln!("warning: failed to initialize logging: {e}");
    }

    if let Command::Init { force } = &args.command {
        let renderer = Renderer::new(!args.no_color);
        if let Err(msg) = run_init(&renderer, *force) {
            renderer.error(&msg);
            std::process::exit(1);
        }
        return;
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    if let Some(url) = &args.base_url {
        config.api.base_url = url.trim_end_matches('/').to_string();
    }
    if args.no_color {
        config.display.color = false;
    }

    let renderer = Renderer::new(config.display.color);
    let app = App::new(&config, renderer);
    if let Err(msg) = app.run(args.command).await {
        renderer.error(&msg);
        std::process::exit(1);
    }
}
