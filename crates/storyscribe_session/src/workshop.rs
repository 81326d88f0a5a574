//! Workflow actions.

use crate::{Export, GenerationRequest, PartPreview, Preview, Session, Settings, SettingsUpdate};
use storyscribe_client::GenerationDriver;
use storyscribe_config::{ModelCatalog, ModelOverview, StoryscribeConfig};
use storyscribe_core::{
    ModelId, OutputEstimator, Script, ScriptId, Temperature, TokenCounter, Version,
    VersionBuilder, assemble, describe, next_version_number, timestamp,
};
use storyscribe_error::{InputError, StoryscribeResult};
use storyscribe_storage::VersionStore;
use tracing::{debug, info, instrument, warn};

/// Runs the drafting workflow against a store and a generation driver.
///
/// The workshop holds no per-user state; every action takes the [`Session`]
/// it operates on. Actions that persist update the session only after the
/// store accepted the change.
pub struct Workshop<S: VersionStore, D: GenerationDriver> {
    store: S,
    driver: D,
    catalog: ModelCatalog,
    estimator: OutputEstimator,
    defaults: Settings,
}

impl<S: VersionStore, D: GenerationDriver> Workshop<S, D> {
    /// Create a workshop from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the catalog or defaults are invalid.
    pub fn new(config: &StoryscribeConfig, store: S, driver: D) -> StoryscribeResult<Self> {
        let defaults = Settings {
            system_prompt: config.app.system_prompt.clone(),
            model: config.default_model()?,
            temperature: config.default_temperature()?,
        };
        Ok(Self::from_parts(
            config.catalog()?,
            config.estimator(),
            defaults,
            store,
            driver,
        ))
    }

    /// Create a workshop from already validated parts.
    pub fn from_parts(
        catalog: ModelCatalog,
        estimator: OutputEstimator,
        defaults: Settings,
        store: S,
        driver: D,
    ) -> Self {
        Self {
            store,
            driver,
            catalog,
            estimator,
            defaults,
        }
    }

    /// Model catalog in use.
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Store in use.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Start a session with the stored scripts and default settings.
    ///
    /// # Errors
    ///
    /// Returns a storage or JSON error if the script list cannot be read.
    #[instrument(skip(self))]
    pub async fn start(&self) -> StoryscribeResult<Session> {
        let scripts = self.store.load_scripts().await?;
        info!(scripts = scripts.len(), "Session started");
        Ok(Session::new(scripts, self.defaults.clone()))
    }

    /// Create a script, persist it and open it.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the script list cannot be saved; the session
    /// is left unchanged.
    #[instrument(skip(self, session, brief))]
    pub async fn create_script(
        &self,
        session: &mut Session,
        title: Option<String>,
        brief: Option<String>,
    ) -> StoryscribeResult<ScriptId> {
        let now = timestamp::now();
        let id = ScriptId::unique_from_time(&now, session.scripts().iter().map(Script::id));
        let script = Script::new(
            id.clone(),
            title.unwrap_or_default(),
            brief.unwrap_or_default(),
            now,
        );

        let mut scripts = session.scripts().clone();
        scripts.push(script);
        self.store.save_scripts(&scripts).await?;
        session.set_scripts(scripts);
        info!(script_id = %id, "Script created");

        self.open_script(session, &id).await?;
        Ok(id)
    }

    /// Open a script: load its versions, clear the selection and show the latest version.
    ///
    /// # Errors
    ///
    /// Returns an input error for an unknown id, or a storage error if the
    /// versions cannot be read.
    #[instrument(skip(self, session), fields(script_id = %id))]
    pub async fn open_script(&self, session: &mut Session, id: &ScriptId) -> StoryscribeResult<()> {
        if !session.scripts().iter().any(|s| s.id() == id) {
            return Err(InputError::new(format!("Script {} does not exist", id)).into());
        }
        let versions = self.store.load_versions(id).await?;
        debug!(versions = versions.len(), "Opened script");
        session.open(id.clone(), versions);
        Ok(())
    }

    /// Change the open script's title and/or brief.
    ///
    /// Persists only when something actually changed. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns an input error if no script is open, or a storage error if the
    /// script list cannot be saved.
    #[instrument(skip(self, session, brief))]
    pub async fn update_script(
        &self,
        session: &mut Session,
        title: Option<String>,
        brief: Option<String>,
    ) -> StoryscribeResult<bool> {
        let id = session.require_script()?.id().clone();
        let mut scripts = session.scripts().clone();
        let changed = scripts
            .iter_mut()
            .find(|s| *s.id() == id)
            .map(|script| script.apply_edit(title, brief, timestamp::now()))
            .unwrap_or(false);

        if changed {
            self.store.save_scripts(&scripts).await?;
            session.set_scripts(scripts);
            info!(script_id = %id, "Script updated");
        }
        Ok(changed)
    }

    /// Change request settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the model is not in the catalog.
    pub fn update_settings(
        &self,
        session: &mut Session,
        update: SettingsUpdate,
    ) -> StoryscribeResult<()> {
        if let Some(model) = update.model {
            self.catalog.spec(model)?;
        }
        let settings = session.settings_mut();
        if let Some(system_prompt) = update.system_prompt {
            settings.system_prompt = system_prompt;
        }
        if let Some(model) = update.model {
            settings.model = model;
        }
        if let Some(temperature) = update.temperature {
            settings.temperature = temperature;
        }
        Ok(())
    }

    fn resolve(&self, session: &Session, request: &GenerationRequest) -> (ModelId, Temperature) {
        (
            request.model.unwrap_or(session.settings().model),
            request.temperature.unwrap_or(session.settings().temperature),
        )
    }

    /// Assemble a request and estimate its size and cost without sending it.
    ///
    /// # Errors
    ///
    /// Returns an input error if no script is open, or a configuration error
    /// if the model is not in the catalog.
    #[instrument(skip(self, session, request))]
    pub fn preview(
        &self,
        session: &Session,
        request: &GenerationRequest,
    ) -> StoryscribeResult<Preview> {
        let script = session.require_script()?;
        let (model, temperature) = self.resolve(session, request);
        let context_window = self.catalog.context_window(model)?;

        let selected = session.selected_versions();
        let system_prompt = &session.settings().system_prompt;
        let messages = assemble(
            system_prompt,
            script.brief(),
            selected.iter().copied(),
            &request.prompt,
        );

        let counter = TokenCounter::cached(model.as_static());
        let parts: Vec<PartPreview> =
            describe(script.brief(), selected.iter().copied(), &request.prompt)
                .into_iter()
                .map(|part| {
                    let tokens = counter.count(part.content());
                    PartPreview::new(part.label(), part.content().clone(), tokens)
                })
                .collect();

        let input_tokens = counter.count_messages(&messages);
        let estimated_output_tokens = self.estimator.estimate_for_brief(script.brief());
        let estimated_cost = self
            .catalog
            .estimate_cost(model, input_tokens, estimated_output_tokens)?;

        let preview = Preview::new(
            model,
            temperature,
            messages,
            parts,
            counter.count(system_prompt),
            input_tokens,
            estimated_output_tokens,
            estimated_cost,
            context_window,
        );
        debug!(
            %model,
            input_tokens,
            estimated_output_tokens,
            estimated_cost,
            exceeds_context = preview.exceeds_context(),
            "Request previewed"
        );
        Ok(preview)
    }

    /// Generate, persist and display a new version.
    ///
    /// Nothing is sent when the request exceeds the model's context window, and
    /// nothing is persisted when generation fails.
    ///
    /// # Errors
    ///
    /// Returns an input error for an empty prompt or no open script, a
    /// capacity error for an oversized request, the classified generation
    /// error from the driver, or a storage error if saving fails.
    #[instrument(skip(self, session, request))]
    pub async fn generate(
        &self,
        session: &mut Session,
        request: &GenerationRequest,
    ) -> StoryscribeResult<Version> {
        if request.prompt.trim().is_empty() {
            return Err(InputError::new("Prompt must not be empty").into());
        }
        let preview = self.preview(session, request)?;
        let model = *preview.model();
        if let Err(e) = self.catalog.check_capacity(model, *preview.input_tokens()) {
            warn!(
                %model,
                input_tokens = preview.input_tokens(),
                context_window = preview.context_window(),
                "Request exceeds context window, not sending"
            );
            return Err(e);
        }

        info!(
            %model,
            provider = self.driver.provider_name(),
            input_tokens = preview.input_tokens(),
            "Requesting generation"
        );
        let content = self
            .driver
            .generate(preview.messages(), model, *preview.temperature())
            .await?;

        let script_id = session.require_script()?.id().clone();
        let version = VersionBuilder::default()
            .timestamp(timestamp::now())
            .model(model.as_static())
            .temperature(preview.temperature().value())
            .prompt(request.prompt.clone())
            .content(content)
            .input_tokens(*preview.input_tokens())
            .estimated_cost(*preview.estimated_cost())
            .context(preview.labels())
            .version_number(next_version_number(session.versions()))
            .build()
            .map_err(|e| InputError::new(format!("Incomplete version: {}", e)))?;

        let mut versions = session.versions().clone();
        versions.push(version.clone());
        self.store.save_versions(&script_id, &versions).await?;
        session.set_versions(versions, version.version_number);

        info!(
            script_id = %script_id,
            version_number = version.version_number,
            "Version saved"
        );
        Ok(version)
    }

    /// Prepare a version for download as a text file.
    ///
    /// The file name is `{title}_{timestamp}.txt`. Whitespace, path
    /// separators, quotes, control characters and other characters that are
    /// not portable in file names become `_` in the title; the timestamp's
    /// space and colons become `_` and `-`.
    ///
    /// # Errors
    ///
    /// Returns an input error if no script is open, the version does not
    /// exist, or it has no content.
    pub fn export(&self, session: &Session, number: u32) -> StoryscribeResult<Export> {
        let script = session.require_script()?;
        let version = session
            .version(number)
            .ok_or_else(|| InputError::new(format!("Version {} does not exist", number)))?;
        let content = version
            .content
            .as_ref()
            .ok_or_else(|| InputError::new(format!("Version {} has no content", number)))?;

        let filename = format!(
            "{}_{}.txt",
            filename_stem(script.title()),
            timestamp::format(&version.timestamp)
                .replace(' ', "_")
                .replace(':', "-")
        );
        Ok(Export::new(filename, content.clone()))
    }

    /// Catalog entry and rate limits of a model, for display.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the model is not in the catalog.
    pub fn model_overview(&self, model: ModelId) -> StoryscribeResult<ModelOverview> {
        Ok(self.catalog.overview(model)?)
    }
}

/// Title reduced to characters that are safe in a single file name component.
fn filename_stem(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '"' | '\'' | '*' | '?' | '<' | '>' | '|' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c => c,
        })
        .collect()
}
