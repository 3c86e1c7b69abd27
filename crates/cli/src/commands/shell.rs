//! Interactive session: login form, then the search screen.
//!
//! Each input line parses into an [`Intent`]; [`Session::handle`] runs it
//! against the controllers and returns the text to show. Failures never end
//! the session, they are logged and reported inline.

use std::io::Write;
use std::str::FromStr;

use dogmatch_client::{
    AdoptionApi, ApiError, FavoriteDogs, FavoritesStore, KeyValueStore, MatchError,
    MatchGenerator, Outcome, SearchController, SearchTicket,
};
use dogmatch_core::{BreedName, Credential, CredentialError, DogId, SortOrder, SortOrderError};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{error, info, warn};

use super::render;

// =============================================================================
// Login
// =============================================================================

/// Errors from the login form.
#[derive(Debug, Error)]
pub enum LoginError {
    #[error("Please enter your name and a valid email ({0}).")]
    Invalid(#[from] CredentialError),

    /// The cause only goes to the log.
    #[error("Failed to log in. Please check your name and email.")]
    Failed(#[from] ApiError),
}

/// Validate the form and open a session. Exactly one service call is made,
/// and only when the input is valid.
///
/// # Errors
///
/// Returns [`LoginError::Invalid`] without calling the service, or
/// [`LoginError::Failed`] if the service rejects the login.
pub async fn login<A: AdoptionApi>(
    api: &A,
    name: &str,
    email: &str,
) -> Result<Credential, LoginError> {
    let credential = Credential::new(name, email)?;

    api.login(&credential)
        .await
        .inspect_err(|e| error!(error = %e, "Error logging in"))?;

    info!(name = credential.name(), "Logged in");
    Ok(credential)
}

// =============================================================================
// Intents
// =============================================================================

/// One user action on the search screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Breeds,
    /// `None` shows all breeds.
    Breed(Option<String>),
    Sort(SortOrder),
    Page(u32),
    Next,
    Prev,
    /// Row number on the current page, or a dog id.
    Fav(String),
    Favs,
    Clear,
    Match,
    Show,
    Help,
    Quit,
}

/// Errors parsing a command line into an [`Intent`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentError {
    #[error("Unknown command `{0}`. Type `help` for a list.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid page number `{0}`")]
    Page(String),

    #[error("Invalid sort: {0}")]
    Sort(#[from] SortOrderError),
}

impl FromStr for Intent {
    type Err = IntentError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command.to_ascii_lowercase().as_str() {
            "breeds" => Ok(Self::Breeds),
            "breed" if rest.is_empty() => Ok(Self::Breed(None)),
            "breed" => Ok(Self::Breed(Some(rest.to_owned()))),
            "sort" if rest.is_empty() => {
                Err(IntentError::Usage("sort <breed|name|age>:<asc|desc>"))
            }
            "sort" => Ok(Self::Sort(rest.to_ascii_lowercase().parse()?)),
            "page" => rest
                .parse()
                .map(Self::Page)
                .map_err(|_| IntentError::Page(rest.to_owned())),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "fav" if rest.is_empty() => Err(IntentError::Usage("fav <row-or-id>")),
            "fav" => Ok(Self::Fav(rest.to_owned())),
            "favs" | "favorites" => Ok(Self::Favs),
            "clear" => Ok(Self::Clear),
            "match" => Ok(Self::Match),
            "show" | "ls" => Ok(Self::Show),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(IntentError::Unknown(command.to_owned())),
        }
    }
}

/// What the shell does after an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

// =============================================================================
// Session
// =============================================================================

/// State of the search screen after login.
pub struct Session<A, S> {
    api: A,
    favorites: FavoritesStore<S>,
    favorite_dogs: FavoriteDogs,
    search: SearchController,
    matcher: MatchGenerator,
    breeds: Vec<BreedName>,
}

impl<A: AdoptionApi, S: KeyValueStore> Session<A, S> {
    /// Open the search screen: load breeds, resolve favorites and run the
    /// first search, all at once.
    pub async fn start(api: A, storage: S) -> Self {
        let favorites = FavoritesStore::hydrate(storage);
        let mut favorite_dogs = FavoriteDogs::new();
        let mut search = SearchController::new();
        let ticket = search.refresh();

        let (breeds, _, _) = tokio::join!(
            api.list_breeds(),
            favorite_dogs.refresh(&api, &favorites),
            search.run(&api, ticket),
        );

        let breeds = breeds.unwrap_or_else(|e| {
            error!(error = %e, "Error fetching breeds");
            Vec::new()
        });

        Self {
            api,
            favorites,
            favorite_dogs,
            search,
            matcher: MatchGenerator::new(),
            breeds,
        }
    }

    pub fn screen(&self) -> String {
        render::search_screen(&self.search, self.favorites.favorites())
    }

    pub async fn handle(&mut self, intent: Intent) -> Reply {
        let text = match intent {
            Intent::Breeds => render::breed_list(&self.breeds),
            Intent::Breed(None) => {
                let ticket = self.search.select_breed(None);
                self.run_search(ticket).await
            }
            Intent::Breed(Some(name)) => match self.known_breed(&name) {
                Some(breed) => {
                    let ticket = self.search.select_breed(Some(breed));
                    self.run_search(ticket).await
                }
                None => format!("Unknown breed `{name}`. Type `breeds` to list them."),
            },
            Intent::Sort(sort) => {
                let ticket = self.search.set_sort(sort);
                self.run_search(ticket).await
            }
            Intent::Page(page) => {
                let ticket = self.search.set_page(page);
                self.run_search(ticket).await
            }
            Intent::Next => {
                let ticket = self.search.next_page();
                self.run_search(ticket).await
            }
            Intent::Prev => {
                let ticket = self.search.previous_page();
                self.run_search(ticket).await
            }
            Intent::Fav(target) => self.toggle_favorite(&target).await,
            Intent::Favs => {
                if !self.favorite_dogs.is_current(&self.favorites) {
                    self.favorite_dogs.refresh(&self.api, &self.favorites).await;
                }
                render::favorites_panel(self.favorites.favorites(), &self.favorite_dogs)
            }
            Intent::Clear => self.clear_favorites().await,
            Intent::Match => self.generate_match().await,
            Intent::Show => self.screen(),
            Intent::Help => render::HELP.to_owned(),
            Intent::Quit => return Reply::Quit,
        };

        Reply::Text(text)
    }

    async fn run_search(&mut self, ticket: SearchTicket) -> String {
        match self.search.run(&self.api, ticket).await {
            Outcome::Applied | Outcome::Superseded => self.screen(),
            Outcome::Failed => format!("Could not load dogs.\n{}", self.screen()),
        }
    }

    /// Match `name` against the loaded breeds ignoring case. Without a breed
    /// list the name is used as typed.
    fn known_breed(&self, name: &str) -> Option<BreedName> {
        if self.breeds.is_empty() {
            return Some(BreedName::new(name));
        }

        self.breeds
            .iter()
            .find(|breed| breed.as_str().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// A 1-based row on the current page, otherwise a dog id.
    fn resolve_target(&self, target: &str) -> DogId {
        target
            .parse::<usize>()
            .ok()
            .and_then(|row| row.checked_sub(1))
            .and_then(|index| self.search.dogs().get(index))
            .map_or_else(|| DogId::new(target), |dog| dog.id.clone())
    }

    fn display_name(&self, id: &DogId) -> String {
        self.search
            .dogs()
            .iter()
            .chain(self.favorite_dogs.dogs())
            .find(|dog| dog.id == *id)
            .map_or_else(|| id.to_string(), |dog| dog.name.clone())
    }

    async fn toggle_favorite(&mut self, target: &str) -> String {
        let id = self.resolve_target(target);
        let name = self.display_name(&id);

        match self.favorites.toggle(id) {
            Ok(added) => {
                self.favorite_dogs.refresh(&self.api, &self.favorites).await;
                let verb = if added { "Added" } else { "Removed" };
                let direction = if added { "to" } else { "from" };
                format!("{verb} {name} {direction} favorites.\n{}", self.screen())
            }
            Err(e) => {
                warn!(error = %e, "Error saving favorites");
                format!("Could not save favorites: {e}")
            }
        }
    }

    async fn clear_favorites(&mut self) -> String {
        match self.favorites.clear() {
            Ok(()) => {
                self.favorite_dogs.refresh(&self.api, &self.favorites).await;
                "Favorites cleared.".to_owned()
            }
            Err(e) => {
                warn!(error = %e, "Error clearing favorites");
                format!("Could not clear favorites: {e}")
            }
        }
    }

    async fn generate_match(&mut self) -> String {
        match self.matcher.generate(&self.api, self.favorites.favorites()).await {
            Ok(dog) => render::match_panel(Some(dog)),
            Err(e @ MatchError::NoFavorites) => e.to_string(),
            Err(_) => format!(
                "Could not generate a match.\n{}",
                render::match_panel(self.matcher.current())
            ),
        }
    }
}

// =============================================================================
// Shell loop
// =============================================================================

/// Run the login form and then the search screen until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading input or writing output fails.
pub async fn run<A, S, R, W>(
    api: A,
    storage: S,
    input: R,
    mut out: W,
) -> Result<(), Box<dyn std::error::Error>>
where
    A: AdoptionApi,
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    writeln!(out, "Log in to search adoptable dogs.")?;
    loop {
        let Some(name) = prompt(&mut lines, &mut out, "Name: ").await? else {
            return Ok(());
        };
        let Some(email) = prompt(&mut lines, &mut out, "Email: ").await? else {
            return Ok(());
        };

        match login(&api, &name, &email).await {
            Ok(_) => break,
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    let mut session = Session::start(api, storage).await;
    writeln!(out, "{}\nType `help` for commands.", session.screen())?;

    while let Some(line) = prompt(&mut lines, &mut out, "> ").await? {
        if line.trim().is_empty() {
            continue;
        }

        let intent = match line.parse::<Intent>() {
            Ok(intent) => intent,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match session.handle(intent).await {
            Reply::Text(text) => writeln!(out, "{text}")?,
            Reply::Quit => break,
        }
    }

    Ok(())
}

async fn prompt<R, W>(
    lines: &mut Lines<R>,
    out: &mut W,
    label: &str,
) -> Result<Option<String>, std::io::Error>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{label}")?;
    out.flush()?;
    lines.next_line().await
}
