//! Integration tests for the login, search, favorites and match flows.
//!
//! Every test drives the client components against `FakeApi`, which records
//! each request so the exact traffic can be asserted.

#![allow(clippy::unwrap_used)]

use dogmatch_client::testing::{Call, Endpoint, FakeApi, sample_dog};
use dogmatch_client::{
    AdoptionApi, FavoriteDogs, FavoritesStore, MatchError, MatchGenerator, MemoryStore, Outcome,
    SearchController, SearchState,
};
use dogmatch_core::{BreedName, Credential, DogId, SortDirection, SortField, SortOrder};
use dogmatch_integration_tests::two_breed_catalog;

fn credential() -> Credential {
    Credential::new("Ann", "ann@example.com").unwrap()
}

fn names(search: &SearchController) -> Vec<&str> {
    search.dogs().iter().map(|dog| dog.name.as_str()).collect()
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_calls_fail_until_login() {
    let api = FakeApi::new(two_breed_catalog()).requiring_session();

    let err = api.list_breeds().await.unwrap_err();
    assert!(err.is_unauthorized());

    api.login(&credential()).await.unwrap();
    let breeds = api.list_breeds().await.unwrap();
    assert_eq!(breeds, vec![BreedName::new("Beagle"), BreedName::new("Poodle")]);
}

#[tokio::test]
async fn test_login_is_a_single_call() {
    let api = FakeApi::new(two_breed_catalog()).requiring_session();

    api.login(&credential()).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![Call::Login {
            name: "Ann".to_owned(),
            email: "ann@example.com".to_owned(),
        }]
    );
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_breed_then_page_scenario() {
    let api = FakeApi::new(two_breed_catalog());
    let mut search = SearchController::new();

    let ticket = search.refresh();
    assert_eq!(search.run(&api, ticket).await, Outcome::Applied);
    assert_eq!(search.total(), Some(15));

    let ticket = search.select_breed(Some(BreedName::new("Poodle")));
    assert_eq!(search.run(&api, ticket).await, Outcome::Applied);
    assert_eq!(search.page_count(), 2);

    let ticket = search.set_page(2);
    assert_eq!(search.run(&api, ticket).await, Outcome::Applied);

    let last = api.searches().pop().unwrap();
    assert_eq!(last.breed(), Some(&BreedName::new("Poodle")));
    assert_eq!(last.page(), 2);
    assert_eq!(last.sort().to_string(), "breed:asc");

    assert_eq!(names(&search), ["Poodle 11", "Poodle 12"]);
}

#[tokio::test]
async fn test_each_change_keeps_the_other_parameters() {
    let api = FakeApi::new(two_breed_catalog());
    let mut search = SearchController::new();
    let ticket = search.select_breed(Some(BreedName::new("Poodle")));
    search.run(&api, ticket).await;
    let ticket = search.set_page(2);
    search.run(&api, ticket).await;

    let by_age = SortOrder::new(SortField::Age, SortDirection::Desc);
    let ticket = search.set_sort(by_age);
    search.run(&api, ticket).await;

    let ticket = search.select_breed(Some(BreedName::new("Beagle")));
    search.run(&api, ticket).await;

    let searches = api.searches();
    let [first, second, third, fourth] = searches.as_slice() else {
        panic!("expected four searches, got {}", searches.len());
    };

    assert_eq!((first.page(), first.sort()), (1, SortOrder::default()));
    assert_eq!((second.breed(), second.sort()), (first.breed(), first.sort()));
    assert_eq!((third.breed(), third.page()), (second.breed(), second.page()));
    assert_eq!(fourth.sort(), by_age);
    assert_eq!(fourth.breed(), Some(&BreedName::new("Beagle")));
}

#[tokio::test]
async fn test_sort_by_age_descending() {
    let api = FakeApi::new(two_breed_catalog());
    let mut search = SearchController::new();

    let ticket = search.select_breed(Some(BreedName::new("Beagle")));
    search.run(&api, ticket).await;
    let ticket = search.set_sort("age:desc".parse().unwrap());
    search.run(&api, ticket).await;

    assert_eq!(names(&search), ["Cy", "Bo", "Ace"]);
}

#[tokio::test]
async fn test_empty_result_is_not_an_error() {
    let api = FakeApi::new(two_breed_catalog());
    let mut search = SearchController::new();

    let ticket = search.select_breed(Some(BreedName::new("Husky")));
    assert_eq!(search.run(&api, ticket).await, Outcome::Applied);

    assert_eq!(search.total(), Some(0));
    assert_eq!(search.page_count(), 0);
    assert!(search.dogs().is_empty());
    assert!(!search.is_loading());
    // No record lookup for an empty page
    assert!(!api.calls().iter().any(|call| matches!(call, Call::FetchDogs(_))));
}

#[tokio::test]
async fn test_later_search_wins_whichever_finishes_first() {
    let api = FakeApi::new(two_breed_catalog());
    let mut search = SearchController::new();

    let beagles = search.select_breed(Some(BreedName::new("Beagle")));
    let poodles = search.select_breed(Some(BreedName::new("Poodle")));

    // The later request completes first...
    assert_eq!(search.run(&api, poodles).await, Outcome::Applied);
    // ...and the earlier one is dropped when it lands
    assert_eq!(search.run(&api, beagles).await, Outcome::Superseded);

    assert!(names(&search).iter().all(|name| name.starts_with("Poodle")));
    assert!(matches!(search.state(), SearchState::Resolved { total: 12, .. }));
}

#[tokio::test]
async fn test_failed_search_keeps_previous_page() {
    let api = FakeApi::new(two_breed_catalog());
    let mut search = SearchController::new();
    let ticket = search.refresh();
    search.run(&api, ticket).await;
    let before: Vec<String> = names(&search).iter().map(ToString::to_string).collect();

    api.fail_next(Endpoint::Dogs);
    let ticket = search.next_page();
    assert_eq!(search.run(&api, ticket).await, Outcome::Failed);

    assert_eq!(names(&search), before);
}

#[tokio::test]
async fn test_failed_breed_change_keeps_page_count() {
    let api = FakeApi::new(two_breed_catalog());
    let mut search = SearchController::new();
    let ticket = search.select_breed(Some(BreedName::new("Beagle")));
    search.run(&api, ticket).await;

    api.fail_next(Endpoint::Dogs);
    let ticket = search.select_breed(Some(BreedName::new("Poodle")));
    assert_eq!(search.run(&api, ticket).await, Outcome::Failed);

    assert_eq!(search.total(), Some(3));
    assert_eq!(search.page_count(), 1);
    assert_eq!(names(&search), ["Ace", "Bo", "Cy"]);
    assert!(!search.is_loading());
}

// ============================================================================
// Favorites and match
// ============================================================================

#[tokio::test]
async fn test_favorites_resolve_in_insertion_order() {
    let api = FakeApi::new(two_breed_catalog());
    let mut store = FavoritesStore::hydrate(MemoryStore::new());
    store.toggle(DogId::new("p03")).unwrap();
    store.toggle(DogId::new("b1")).unwrap();

    let mut dogs = FavoriteDogs::new();
    assert_eq!(dogs.refresh(&api, &store).await, Outcome::Applied);

    let resolved: Vec<&str> = dogs.dogs().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(resolved, ["p03", "b1"]);
}

#[tokio::test]
async fn test_stale_favorites_resolution_is_discarded() {
    let api = FakeApi::new(two_breed_catalog());
    let mut store = FavoritesStore::hydrate(MemoryStore::new());
    store.toggle(DogId::new("b1")).unwrap();

    let snapshot = store.snapshot();
    let resolved = snapshot.resolve(&api).await.unwrap();
    store.toggle(DogId::new("b2")).unwrap();

    let mut dogs = FavoriteDogs::new();
    assert!(!dogs.apply(&store, &snapshot, resolved));
    assert!(dogs.dogs().is_empty());
    assert!(!dogs.is_current(&store));
}

#[tokio::test]
async fn test_match_with_no_favorites_makes_no_call() {
    let api = FakeApi::new(two_breed_catalog());
    let store = FavoritesStore::hydrate(MemoryStore::new());
    let mut matcher = MatchGenerator::new();

    let err = matcher.generate(&api, store.favorites()).await.unwrap_err();

    assert!(matches!(err, MatchError::NoFavorites));
    assert_eq!(
        err.to_string(),
        "Please select at least one dog to generate a match."
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_match_end_to_end() {
    let api = FakeApi::new(vec![
        sample_dog("1", "Ace", "Beagle", 2),
        sample_dog("2", "Bo", "Poodle", 4),
    ])
    .requiring_session();
    api.login(&credential()).await.unwrap();

    let mut store = FavoritesStore::hydrate(MemoryStore::new());
    store.toggle(DogId::new("1")).unwrap();
    store.toggle(DogId::new("2")).unwrap();
    api.pick_match(DogId::new("2"));

    let mut matcher = MatchGenerator::new();
    let matched = matcher.generate(&api, store.favorites()).await.unwrap();
    assert_eq!(matched.name, "Bo");

    let calls = api.calls();
    assert_eq!(
        calls.get(1..),
        Some(
            [
                Call::GenerateMatch(vec![DogId::new("1"), DogId::new("2")]),
                Call::FetchDogs(vec![DogId::new("2")]),
            ]
            .as_slice()
        )
    );
}

#[tokio::test]
async fn test_failed_match_keeps_previous_match() {
    let api = FakeApi::new(two_breed_catalog());
    let mut store = FavoritesStore::hydrate(MemoryStore::new());
    store.toggle(DogId::new("b1")).unwrap();

    let mut matcher = MatchGenerator::new();
    matcher.generate(&api, store.favorites()).await.unwrap();

    api.fail_next(Endpoint::Match);
    let err = matcher.generate(&api, store.favorites()).await.unwrap_err();

    assert!(matches!(err, MatchError::Api(_)));
    assert_eq!(matcher.current().map(|dog| dog.id.as_str()), Some("b1"));
}
