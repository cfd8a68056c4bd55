//! Game-side scenarios: promotion from a full lobby, disconnect and
//! disqualification, reconnect invalidating a pending disqualification,
//! and externally triggered game teardown.

mod test_helpers;

use connection_hub::application::command_processors::{
    create_game, create_lobby, disconnect_from_game, end_game, join_lobby, reconnect_to_game,
    try_to_disqualify_player, CreateGameInput, CreateLobbyInput, DisconnectFromGameInput, EndGameInput,
    JoinLobbyInput, ReconnectToGameInput, TryToDisqualifyPlayerInput,
};
use connection_hub::application::common::{Event, Task};
use connection_hub::application::errors::{ApplicationError, ProcessorError};
use connection_hub::domain::identifiers::UserId;
use connection_hub::domain::models::{PlayerStatus, RuleSet};
use std::time::Duration;
use test_helpers::TestHub;
use uuid::Uuid;

fn user(n: u8) -> UserId {
    UserId(Uuid::from_u128(n as u128))
}

fn rule_set() -> RuleSet {
    RuleSet::ConnectFour {
        time_for_each_player: Duration::from_secs(60),
    }
}

/// Fills and returns a two-player lobby id, with both users already
/// members (`user(1)` as admin).
async fn full_lobby(hub: &TestHub) -> connection_hub::domain::identifiers::LobbyId {
    create_lobby(
        &hub.context(),
        user(1),
        CreateLobbyInput {
            name: "final table".to_string(),
            rule_set: rule_set(),
            password: None,
        },
    )
    .await
    .unwrap();
    let lobby_id = hub
        .lobby_gateway
        .by_user_id(user(1), false, &hub.context().locks)
        .await
        .unwrap()
        .unwrap()
        .id;
    join_lobby(
        &hub.context(),
        user(2),
        JoinLobbyInput {
            lobby_id,
            password: None,
        },
    )
    .await
    .unwrap();
    lobby_id
}

/// S3: a full lobby is promoted into a game. The lobby is gone, both
/// players start connected with the rule set's full time budget, and
/// each gets a `DisconnectFromGame` task scheduled at the presence
/// grace horizon while their stale `RemoveFromLobby` tasks are dropped.
#[tokio::test]
async fn create_game_consumes_lobby_and_schedules_disconnect_tasks() {
    let hub = TestHub::new();
    let lobby_id = full_lobby(&hub).await;

    create_game(&hub.context(), user(1), CreateGameInput { lobby_id })
        .await
        .unwrap();

    assert!(hub
        .lobby_gateway
        .by_id(lobby_id, false, &hub.context().locks)
        .await
        .unwrap()
        .is_none());

    let game = hub
        .game_gateway
        .by_player_id(user(1), false, &hub.context().locks)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(game.players.len(), 2);
    for state in game.players.values() {
        assert_eq!(state.status, PlayerStatus::Connected);
        assert_eq!(state.time_left, Duration::from_secs(60));
    }

    let far_future = chrono::Utc::now() + chrono::Duration::days(1);
    let due = hub.due_tasks(far_future).await;
    let disconnect_tasks: Vec<_> = due
        .iter()
        .filter(|t| matches!(t, Task::DisconnectFromGame(dt) if dt.game_id == game.id))
        .collect();
    assert_eq!(disconnect_tasks.len(), 2);
    let stale_remove_tasks = due
        .iter()
        .any(|t| matches!(t, Task::RemoveFromLobby(rt) if rt.lobby_id == lobby_id));
    assert!(!stale_remove_tasks);

    let events = hub.event_publisher.events();
    assert!(events.iter().any(|e| matches!(
        e,
        Event::ConnectFourGameCreated { first_player_id, second_player_id, .. }
            if (*first_player_id == user(1) && *second_player_id == user(2))
                || (*first_player_id == user(2) && *second_player_id == user(1))
    )));
}

#[tokio::test]
async fn create_game_rejects_non_admin_caller() {
    let hub = TestHub::new();
    let lobby_id = full_lobby(&hub).await;

    let err = create_game(&hub.context(), user(2), CreateGameInput { lobby_id })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProcessorError::Application(ApplicationError::Domain(
            connection_hub::domain::errors::DomainError::UserIsNotAdmin
        ))
    ));
}

/// S4: a disconnected player who never reconnects is disqualified once
/// their deadline fires, ending the game since one player is below the
/// two-player minimum.
#[tokio::test]
async fn disconnect_then_expire_disqualifies_and_ends_game() {
    let hub = TestHub::new();
    let lobby_id = full_lobby(&hub).await;
    create_game(&hub.context(), user(1), CreateGameInput { lobby_id })
        .await
        .unwrap();
    let game_id = hub
        .game_gateway
        .by_player_id(user(1), false, &hub.context().locks)
        .await
        .unwrap()
        .unwrap()
        .id;

    disconnect_from_game(&hub.context(), user(1), DisconnectFromGameInput { game_id })
        .await
        .unwrap();

    let far_future = chrono::Utc::now() + chrono::Duration::days(1);
    let due = hub.due_tasks(far_future).await;
    let disqualify_task = due
        .iter()
        .find(|t| matches!(t, Task::TryToDisqualifyPlayer(dt) if dt.game_id == game_id && dt.player_id == user(1)))
        .unwrap();
    let Task::TryToDisqualifyPlayer(dt) = disqualify_task else {
        unreachable!()
    };

    try_to_disqualify_player(
        &hub.context(),
        TryToDisqualifyPlayerInput {
            game_id: dt.game_id,
            player_id: dt.player_id,
            player_state_id: dt.player_state_id,
        },
    )
    .await
    .unwrap();

    assert!(hub
        .game_gateway
        .by_id(game_id, false, &hub.context().locks)
        .await
        .unwrap()
        .is_none());

    let events = hub.event_publisher.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::PlayerDisqualified { player_id, .. } if *player_id == user(1))));

    let remaining_due = hub.due_tasks(far_future).await;
    assert!(remaining_due.is_empty());
}

/// S5: reconnecting rotates the player's state id, so a disqualify
/// task queued before the reconnect becomes a stale no-op even if it
/// is still dequeued and run.
#[tokio::test]
async fn reconnect_invalidates_pending_disqualification() {
    let hub = TestHub::new();
    let lobby_id = full_lobby(&hub).await;
    create_game(&hub.context(), user(1), CreateGameInput { lobby_id })
        .await
        .unwrap();
    let game_id = hub
        .game_gateway
        .by_player_id(user(1), false, &hub.context().locks)
        .await
        .unwrap()
        .unwrap()
        .id;

    disconnect_from_game(&hub.context(), user(1), DisconnectFromGameInput { game_id })
        .await
        .unwrap();

    let far_future = chrono::Utc::now() + chrono::Duration::days(1);
    let due_before_reconnect = hub.due_tasks(far_future).await;
    let stale_task = due_before_reconnect
        .iter()
        .find(|t| matches!(t, Task::TryToDisqualifyPlayer(dt) if dt.game_id == game_id && dt.player_id == user(1)))
        .cloned()
        .unwrap();

    reconnect_to_game(&hub.context(), user(1), ReconnectToGameInput { game_id })
        .await
        .unwrap();

    let Task::TryToDisqualifyPlayer(stale) = stale_task else {
        unreachable!()
    };
    try_to_disqualify_player(
        &hub.context(),
        TryToDisqualifyPlayerInput {
            game_id: stale.game_id,
            player_id: stale.player_id,
            player_state_id: stale.player_state_id,
        },
    )
    .await
    .unwrap();

    let game = hub
        .game_gateway
        .by_id(game_id, false, &hub.context().locks)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(game.players.len(), 2);
    assert_eq!(game.players[&user(1)].status, PlayerStatus::Connected);

    let events = hub.event_publisher.events();
    assert!(!events.iter().any(|e| matches!(e, Event::PlayerDisqualified { .. })));
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::PlayerReconnected { player_id, .. } if *player_id == user(1))));
}

#[tokio::test]
async fn disconnecting_twice_is_rejected() {
    let hub = TestHub::new();
    let lobby_id = full_lobby(&hub).await;
    create_game(&hub.context(), user(1), CreateGameInput { lobby_id })
        .await
        .unwrap();
    let game_id = hub
        .game_gateway
        .by_player_id(user(1), false, &hub.context().locks)
        .await
        .unwrap()
        .unwrap()
        .id;

    disconnect_from_game(&hub.context(), user(1), DisconnectFromGameInput { game_id })
        .await
        .unwrap();
    let err = disconnect_from_game(&hub.context(), user(1), DisconnectFromGameInput { game_id })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProcessorError::Application(ApplicationError::Domain(
            connection_hub::domain::errors::DomainError::UserIsDisconnectedFromGame
        ))
    ));
}

/// An externally triggered end clears both players' scheduled tasks,
/// and is a silent no-op for a game that is already gone.
#[tokio::test]
async fn end_game_clears_remaining_tasks_and_is_idempotent() {
    let hub = TestHub::new();
    let lobby_id = full_lobby(&hub).await;
    create_game(&hub.context(), user(1), CreateGameInput { lobby_id })
        .await
        .unwrap();
    let game_id = hub
        .game_gateway
        .by_player_id(user(1), false, &hub.context().locks)
        .await
        .unwrap()
        .unwrap()
        .id;

    end_game(&hub.context(), EndGameInput { game_id })
        .await
        .unwrap();

    assert!(hub
        .game_gateway
        .by_id(game_id, false, &hub.context().locks)
        .await
        .unwrap()
        .is_none());

    let far_future = chrono::Utc::now() + chrono::Duration::days(1);
    let due = hub.due_tasks(far_future).await;
    assert!(due.is_empty());

    end_game(&hub.context(), EndGameInput { game_id })
        .await
        .unwrap();
}

#[tokio::test]
async fn create_game_rejects_caller_not_in_lobby() {
    let hub = TestHub::new();
    let lobby_id = full_lobby(&hub).await;

    let err = create_game(&hub.context(), user(3), CreateGameInput { lobby_id })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ProcessorError::Application(ApplicationError::CurrentUserNotInLobby)
    ));
}
