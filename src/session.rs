//! Editing sessions: load a document, edit its variables, save it back.
//!
//! [`open_editor`] (or its callback form [`load_editor`]) is the entry point
//! a host calls with the document URI. The resulting [`EditorSession`] owns
//! the fetched document and the [`VariableSet`] built from it; its
//! [`save`](EditorSession::save) writes the edited variables back with the
//! rest of the document unchanged.

use crate::executor::{
    DocumentClient, ExecutionConfig, LoadError, RequestError, SaveError, SaveReceipt,
};
use crate::models::{Document, EditError, VariableSet};
use log::{error, info};
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Receives messages that must be shown to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Notifier that reports through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        error!("{}", message);
    }
}

/// Error types for editing sessions.
#[derive(Debug)]
pub enum EditorError {
    /// The document URI could not be parsed.
    InvalidUri(String),

    /// The HTTP client could not be built.
    Request(RequestError),

    /// The document could not be loaded.
    Load(LoadError),

    /// The document could not be saved.
    Save(SaveError),

    /// An edit did not fit the entry it was applied to.
    Edit(EditError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorError::InvalidUri(msg) => write!(f, "Invalid document URI: {}", msg),
            EditorError::Request(err) => write!(f, "{}", err),
            EditorError::Load(err) => write!(f, "Failed to load: {}", err),
            EditorError::Save(err) => write!(f, "Failed to save: {}", err),
            EditorError::Edit(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for EditorError {}

impl From<url::ParseError> for EditorError {
    fn from(err: url::ParseError) -> Self {
        EditorError::InvalidUri(err.to_string())
    }
}

impl From<RequestError> for EditorError {
    fn from(err: RequestError) -> Self {
        EditorError::Request(err)
    }
}

impl From<LoadError> for EditorError {
    fn from(err: LoadError) -> Self {
        EditorError::Load(err)
    }
}

impl From<SaveError> for EditorError {
    fn from(err: SaveError) -> Self {
        EditorError::Save(err)
    }
}

impl From<EditError> for EditorError {
    fn from(err: EditError) -> Self {
        EditorError::Edit(err)
    }
}

/// A loaded document and its editable variables.
pub struct EditorSession {
    uri: Url,
    document: Document,
    variables: VariableSet,
    client: DocumentClient,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("uri", &self.uri.as_str())
            .field("document", &self.document)
            .field("variables", &self.variables)
            .finish()
    }
}

/// Loads the document at `uri` and builds an editing session for it.
///
/// Load failures are reported to `notifier` and returned; no session is
/// created in that case.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use vars_editor::executor::ExecutionConfig;
/// use vars_editor::session::{open_editor, LogNotifier};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExecutionConfig::new(30);
/// let mut session = open_editor(
///     "http://localhost:5000/api/item/fireflash/",
///     &config,
///     Arc::new(LogNotifier),
/// )
/// .await?;
/// session.variables_mut().set_variable("hello", &serde_json::json!("world"));
/// session.save().await?;
/// # Ok(())
/// # }
/// ```
pub async fn open_editor(
    uri: &str,
    config: &ExecutionConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<EditorSession, EditorError> {
    let result = open_editor_inner(uri, config, Arc::clone(&notifier)).await;
    if let Err(err) = &result {
        notifier.notify(&err.to_string());
    }
    result
}

async fn open_editor_inner(
    uri: &str,
    config: &ExecutionConfig,
    notifier: Arc<dyn Notifier>,
) -> Result<EditorSession, EditorError> {
    let uri = Url::parse(uri)?;
    let client = DocumentClient::new(config)?;
    let document = client.fetch_document(&uri).await?;
    info!("Loaded {} ({} variables)", uri, document.vars.len());
    Ok(EditorSession::new(uri, document, client, notifier))
}

/// Callback form of [`open_editor`]: `on_loaded` is invoked exactly once
/// with the session or the load error.
pub async fn load_editor<F>(
    uri: &str,
    config: &ExecutionConfig,
    notifier: Arc<dyn Notifier>,
    on_loaded: F,
) where
    F: FnOnce(Result<EditorSession, EditorError>),
{
    on_loaded(open_editor(uri, config, notifier).await);
}

impl EditorSession {
    /// Creates a session for an already fetched document.
    pub fn new(
        uri: Url,
        document: Document,
        client: DocumentClient,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let variables = VariableSet::from_document(&document);
        Self {
            uri,
            document,
            variables,
            client,
            notifier,
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// The document as last loaded or successfully saved.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableSet {
        &mut self.variables
    }

    /// Saves the edited variables.
    ///
    /// The object-shaped output of [`VariableSet::save`] replaces the
    /// document's `vars` and the whole document is written to the session
    /// URI. If the server rejects the save, the notifier receives the status
    /// and response body; the variables are left as they are so the save can
    /// be retried.
    pub async fn save(&mut self) -> Result<SaveReceipt, EditorError> {
        let mut document = self.document.clone();
        self.variables.save(|vars| document.replace_vars(vars));

        match self.client.put_document(&self.uri, &document).await {
            Ok(receipt) => {
                info!("Saved {} ({} variables)", self.uri, document.vars.len());
                self.document = document;
                Ok(receipt)
            }
            Err(err) => {
                let err = EditorError::from(err);
                self.notifier.notify(&err.to_string());
                Err(err)
            }
        }
    }
}
