//! Plain-text views of controller and store state.
//!
//! Every function here is pure: it reads state and returns the text to
//! print, so the shell decides where it goes.

use dogmatch_client::{FavoriteDogs, SearchController};
use dogmatch_core::{BreedName, Dog, FavoriteSet};

pub const HELP: &str = "\
Commands:
  breeds               list available breeds
  breed <name>         show only <name>; `breed` alone shows all breeds
  sort <field:dir>     sort by breed, name or age, asc or desc (e.g. age:desc)
  page <n>             go to page <n>
  next, prev           go to the next or previous page
  fav <row-or-id>      add or remove a favorite by row number or dog id
  favs                 show favorites
  clear                remove all favorites
  match                generate a match from your favorites
  show                 show the search results again
  help                 show this help
  quit                 exit";

/// The search screen: filter line, page line and one row per dog.
///
/// Rows carry a `*` marker for favorites and a 1-based row number that
/// `fav` accepts.
pub fn search_screen(search: &SearchController, favorites: &FavoriteSet) -> String {
    let query = search.query();
    let breed = query.breed().map_or("All breeds", BreedName::as_str);

    let mut lines = vec![
        format!("Breed: {breed} | Sort: {}", query.sort().label()),
        page_line(query.page(), search.page_count(), search.total()),
    ];

    if search.total() == Some(0) {
        lines.push("No dogs found.".to_owned());
    } else if search.dogs().is_empty() && search.is_loading() {
        lines.push("Loading...".to_owned());
    } else if search.dogs().is_empty() && search.total().is_some() {
        lines.push("No dogs on this page. Type `page 1` to go back.".to_owned());
    } else {
        lines.extend(search.dogs().iter().enumerate().map(|(i, dog)| {
            let marker = if favorites.contains(&dog.id) { '*' } else { ' ' };
            format!("{marker} {:>2}. {}", i + 1, dog.summary())
        }));
    }

    lines.join("\n")
}

/// `Page X of Y`, where Y is never shown as less than 1.
pub fn page_line(page: u32, page_count: u32, total: Option<u32>) -> String {
    let line = format!("Page {page} of {}", page_count.max(1));
    match total {
        Some(total) => format!("{line} ({total} dogs)"),
        None => line,
    }
}

/// The favorites panel, in the order favorites were added.
pub fn favorites_panel(favorites: &FavoriteSet, dogs: &FavoriteDogs) -> String {
    if favorites.is_empty() {
        return "Favorites: none yet. Use `fav <row>` to add one.".to_owned();
    }

    let mut lines = vec![format!("Favorites ({}):", favorites.len())];
    for id in favorites {
        match dogs.dogs().iter().find(|dog| dog.id == *id) {
            Some(dog) => lines.push(format!("  - {}", dog.summary())),
            None => lines.push(format!("  - {id}")),
        }
    }
    lines.join("\n")
}

/// The match panel.
pub fn match_panel(matched: Option<&Dog>) -> String {
    matched.map_or_else(
        || "No match yet. Add favorites and run `match`.".to_owned(),
        |dog| format!("Your match: {}\n  {}", dog.summary(), dog.img),
    )
}

/// Breed list, one per line.
pub fn breed_list(breeds: &[BreedName]) -> String {
    if breeds.is_empty() {
        return "No breeds available.".to_owned();
    }

    breeds
        .iter()
        .map(|breed| format!("  {breed}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use dogmatch_client::testing::{FakeApi, sample_dog};
    use dogmatch_client::{FavoritesStore, MemoryStore};
    use dogmatch_core::DogId;

    use super::*;

    #[test]
    fn test_page_line_never_shows_zero_pages() {
        assert_eq!(page_line(1, 0, Some(0)), "Page 1 of 1 (0 dogs)");
        assert_eq!(page_line(2, 3, Some(25)), "Page 2 of 3 (25 dogs)");
        assert_eq!(page_line(1, 0, None), "Page 1 of 1");
    }

    #[tokio::test]
    async fn test_search_screen_marks_favorites() {
        let api = FakeApi::new(vec![
            sample_dog("a", "Ace", "Beagle", 2),
            sample_dog("b", "Bo", "Poodle", 4),
        ]);
        let mut search = SearchController::new();
        let ticket = search.refresh();
        search.run(&api, ticket).await;

        let favorites: FavoriteSet = [DogId::new("b")].into_iter().collect();
        let screen = search_screen(&search, &favorites);

        assert_eq!(
            screen,
            [
                "Breed: All breeds | Sort: Breed (A-Z)",
                "Page 1 of 1 (2 dogs)",
                "   1. Ace (Beagle, 2y) 10001",
                "*  2. Bo (Poodle, 4y) 10001",
            ]
            .join("\n")
        );
    }

    #[tokio::test]
    async fn test_search_screen_empty_result() {
        let api = FakeApi::new(Vec::new());
        let mut search = SearchController::new();
        let ticket = search.refresh();
        search.run(&api, ticket).await;

        let screen = search_screen(&search, &FavoriteSet::new());
        assert!(screen.ends_with("No dogs found."));
        assert!(screen.contains("Page 1 of 1 (0 dogs)"));
    }

    #[tokio::test]
    async fn test_search_screen_page_past_end() {
        let mut catalog: Vec<_> = (1..=12)
            .map(|i| sample_dog(&format!("p{i:02}"), &format!("Poodle {i:02}"), "Poodle", i))
            .collect();
        catalog.push(sample_dog("b1", "Ace", "Beagle", 1));
        let api = FakeApi::new(catalog);
        let mut search = SearchController::new();

        let ticket = search.select_breed(Some(BreedName::new("Poodle")));
        search.run(&api, ticket).await;
        let ticket = search.set_page(2);
        search.run(&api, ticket).await;
        let ticket = search.select_breed(Some(BreedName::new("Beagle")));
        search.run(&api, ticket).await;

        let screen = search_screen(&search, &FavoriteSet::new());
        assert_eq!(
            screen,
            [
                "Breed: Beagle | Sort: Breed (A-Z)",
                "Page 2 of 1 (1 dogs)",
                "No dogs on this page. Type `page 1` to go back.",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_search_screen_before_first_result() {
        let mut search = SearchController::new();
        search.refresh();

        let screen = search_screen(&search, &FavoriteSet::new());
        assert!(screen.ends_with("Loading..."));
    }

    #[tokio::test]
    async fn test_favorites_panel_falls_back_to_ids() {
        let api = FakeApi::new(vec![sample_dog("a", "Ace", "Beagle", 2)]);
        let mut store = FavoritesStore::hydrate(MemoryStore::new());
        store.toggle(DogId::new("a")).unwrap();

        let mut dogs = FavoriteDogs::new();
        dogs.refresh(&api, &store).await;
        store.toggle(DogId::new("gone")).unwrap();

        assert_eq!(
            favorites_panel(store.favorites(), &dogs),
            "Favorites (2):\n  - Ace (Beagle, 2y) 10001\n  - gone"
        );
    }

    #[test]
    fn test_empty_panels() {
        assert!(favorites_panel(&FavoriteSet::new(), &FavoriteDogs::new()).contains("none yet"));
        assert!(match_panel(None).starts_with("No match yet"));
        assert_eq!(breed_list(&[]), "No breeds available.");
    }

    #[test]
    fn test_match_panel_shows_photo() {
        let dog = sample_dog("a", "Ace", "Beagle", 2);
        assert_eq!(
            match_panel(Some(&dog)),
            "Your match: Ace (Beagle, 2y) 10001\n  https://images.example.com/a.jpg"
        );
    }
}
