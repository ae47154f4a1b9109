use chrono::Utc;
use uuid::Uuid;

use playconnect_api::domain::types::{MatchChanges, MatchFilter, MatchStatus};
use playconnect_api::error::ApiError;
use playconnect_api::usecase::matches::{
    CreateMatchInput, CreateMatchUseCase, DeleteMatchUseCase, GetMatchUseCase,
    ListJoinedMatchesUseCase, ListMatchesUseCase, ListMyMatchesUseCase, UpdateMatchUseCase,
};

use crate::helpers::{MockMatchRepo, future_date};

fn valid_input() -> CreateMatchInput {
    CreateMatchInput {
        title: "Friday five-a-side".to_owned(),
        game_type: "football".to_owned(),
        date: future_date(),
        location: "Tempelhofer Feld".to_owned(),
        max_players: None,
        description: None,
    }
}

#[tokio::test]
async fn should_create_match_with_creator_as_participant() {
    let creator = Uuid::now_v7();
    let usecase = CreateMatchUseCase {
        repo: MockMatchRepo::empty(),
    };

    let created = usecase.execute(creator, valid_input()).await.unwrap();

    assert_eq!(created.status, MatchStatus::Upcoming);
    assert_eq!(created.max_players, 10); // default capacity
    assert_eq!(created.created_by.id, creator);
    assert_eq!(created.participants.len(), 1);
    assert_eq!(created.participants[0].id, creator);
    assert_eq!(created.description, "");
}

#[tokio::test]
async fn should_reject_past_date_on_create() {
    let mut input = valid_input();
    input.date = Utc::now() - chrono::Duration::hours(1);
    let usecase = CreateMatchUseCase {
        repo: MockMatchRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7(), input).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_reject_capacity_below_two() {
    let mut input = valid_input();
    input.max_players = Some(1);
    let usecase = CreateMatchUseCase {
        repo: MockMatchRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7(), input).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_reject_missing_required_fields() {
    let mut input = valid_input();
    input.title = "  ".to_owned();
    let usecase = CreateMatchUseCase {
        repo: MockMatchRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7(), input).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_return_not_found_for_unknown_match() {
    let usecase = GetMatchUseCase {
        repo: MockMatchRepo::empty(),
    };
    let result = usecase.execute(Uuid::now_v7()).await;
    assert!(matches!(result, Err(ApiError::MatchNotFound)));
}

#[tokio::test]
async fn should_filter_and_sort_listing() {
    let repo = MockMatchRepo::empty();
    let creator = Uuid::now_v7();
    let create = CreateMatchUseCase { repo: repo.clone() };

    let mut late = valid_input();
    late.date = future_date() + chrono::Duration::days(2);
    late.location = "Mauerpark".to_owned();
    let mut early = valid_input();
    early.date = future_date();
    let mut basketball = valid_input();
    basketball.game_type = "basketball".to_owned();

    create.execute(creator, late).await.unwrap();
    create.execute(creator, early).await.unwrap();
    create.execute(creator, basketball).await.unwrap();

    let list = ListMatchesUseCase { repo: repo.clone() };

    let football = list
        .execute(MatchFilter {
            game_type: Some("football".to_owned()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(football.len(), 2);
    assert!(football[0].date <= football[1].date); // ascending by date

    // Case-insensitive substring on location.
    let mauerpark = list
        .execute(MatchFilter {
            location: Some("mauer".to_owned()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mauerpark.len(), 1);
    assert_eq!(mauerpark[0].location, "Mauerpark");
}

#[tokio::test]
async fn should_reject_update_from_non_owner() {
    let repo = MockMatchRepo::empty();
    let creator = Uuid::now_v7();
    let stranger = Uuid::now_v7();
    let created = CreateMatchUseCase { repo: repo.clone() }
        .execute(creator, valid_input())
        .await
        .unwrap();

    let update = UpdateMatchUseCase { repo: repo.clone() };
    let result = update
        .execute(
            stranger,
            created.id,
            MatchChanges {
                title: Some("Hijacked".to_owned()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::NotOwner)));

    // Record unchanged.
    let found = GetMatchUseCase { repo }.execute(created.id).await.unwrap();
    assert_eq!(found.title, "Friday five-a-side");
}

#[tokio::test]
async fn should_apply_partial_update_only() {
    let repo = MockMatchRepo::empty();
    let creator = Uuid::now_v7();
    let created = CreateMatchUseCase { repo: repo.clone() }
        .execute(creator, valid_input())
        .await
        .unwrap();

    let updated = UpdateMatchUseCase { repo }
        .execute(
            creator,
            created.id,
            MatchChanges {
                description: Some("bring your own ball".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.description, "bring your own ball");
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.date, created.date);
}

#[tokio::test]
async fn should_reject_past_date_on_update() {
    let repo = MockMatchRepo::empty();
    let creator = Uuid::now_v7();
    let created = CreateMatchUseCase { repo: repo.clone() }
        .execute(creator, valid_input())
        .await
        .unwrap();

    let result = UpdateMatchUseCase { repo }
        .execute(
            creator,
            created.id,
            MatchChanges {
                date: Some(Utc::now() - chrono::Duration::minutes(5)),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_reject_capacity_below_current_roster() {
    let repo = MockMatchRepo::empty();
    let creator = Uuid::now_v7();
    let mut input = valid_input();
    input.max_players = Some(4);
    let created = CreateMatchUseCase { repo: repo.clone() }
        .execute(creator, input)
        .await
        .unwrap();

    // Two more participants join directly through the mock state.
    {
        let handle = repo.matches_handle();
        let mut matches = handle.lock().unwrap();
        matches[0].participants.push(Uuid::now_v7());
        matches[0].participants.push(Uuid::now_v7());
    }

    let result = UpdateMatchUseCase { repo }
        .execute(
            creator,
            created.id,
            MatchChanges {
                max_players: Some(2), // roster is already 3
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}

#[tokio::test]
async fn should_reject_delete_from_non_owner() {
    let repo = MockMatchRepo::empty();
    let creator = Uuid::now_v7();
    let created = CreateMatchUseCase { repo: repo.clone() }
        .execute(creator, valid_input())
        .await
        .unwrap();

    let result = DeleteMatchUseCase { repo: repo.clone() }
        .execute(Uuid::now_v7(), created.id)
        .await;
    assert!(matches!(result, Err(ApiError::NotOwner)));
    assert_eq!(repo.matches_handle().lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_hard_delete_as_owner() {
    let repo = MockMatchRepo::empty();
    let creator = Uuid::now_v7();
    let created = CreateMatchUseCase { repo: repo.clone() }
        .execute(creator, valid_input())
        .await
        .unwrap();

    DeleteMatchUseCase { repo: repo.clone() }
        .execute(creator, created.id)
        .await
        .unwrap();
    assert!(repo.matches_handle().lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_split_mine_and_joined_listings() {
    let repo = MockMatchRepo::empty();
    let alice = Uuid::now_v7();
    let bob = Uuid::now_v7();
    let create = CreateMatchUseCase { repo: repo.clone() };

    let own = create.execute(alice, valid_input()).await.unwrap();
    let bobs = create.execute(bob, valid_input()).await.unwrap();

    // Alice joins Bob's match through mock state.
    {
        let handle = repo.matches_handle();
        let mut matches = handle.lock().unwrap();
        matches
            .iter_mut()
            .find(|m| m.id == bobs.id)
            .unwrap()
            .participants
            .push(alice);
    }

    let mine = ListMyMatchesUseCase { repo: repo.clone() }
        .execute(alice)
        .await
        .unwrap();
    assert_eq!(mine.len(), 2); // created + joined

    let joined = ListJoinedMatchesUseCase { repo }.execute(alice).await.unwrap();
    assert_eq!(joined.len(), 1);
    assert_eq!(joined[0].id, bobs.id);
    assert_ne!(joined[0].id, own.id);
}
