//! 预订事务集成测试
//!
//! 针对真实 SQLite 数据库 (临时文件, WAL) 验证预订协议的关键性质：
//! 原子性、冲突检测、一人一票约束、取消的完整回滚、并发下单一赢家。

use booking_server::db::DbService;
use booking_server::db::repository::{seat, ticket};
use booking_server::reservation::{self, ReservationError};
use shared::models::SeatStatus;
use sqlx::SqlitePool;

/// Fresh database in a temp dir; migrations + default users applied
async fn setup() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().expect("non-utf8 temp path"))
        .await
        .expect("Failed to initialize database");
    (dir, db.pool)
}

/// Insert a concert with its own theatre and a rows x cols seat grid.
/// Seat ids are `concert_id * 1000 + offset` so tests can address them.
async fn create_concert(pool: &SqlitePool, concert_id: i64, rows: i64, cols: i64) -> Vec<i64> {
    sqlx::query("INSERT INTO theatre (theatre_id, name, rows, columns) VALUES (?, ?, ?, ?)")
        .bind(concert_id)
        .bind(format!("Test Hall {concert_id}"))
        .bind(rows)
        .bind(cols)
        .execute(pool)
        .await
        .expect("Failed to insert theatre");

    sqlx::query("INSERT INTO concert (concert_id, title, date, theatre_id) VALUES (?, ?, ?, ?)")
        .bind(concert_id)
        .bind(format!("Test Concert {concert_id}"))
        .bind("2026-09-01")
        .bind(concert_id)
        .execute(pool)
        .await
        .expect("Failed to insert concert");

    let mut seat_ids = Vec::new();
    let mut offset = 0;
    for row in 1..=rows {
        for position in 1..=cols {
            offset += 1;
            let seat_id = concert_id * 1000 + offset;
            sqlx::query(
                "INSERT INTO seat (seat_id, concert_id, row, position, status)
                 VALUES (?, ?, ?, ?, 'available')",
            )
            .bind(seat_id)
            .bind(concert_id)
            .bind(row)
            .bind(position)
            .execute(pool)
            .await
            .expect("Failed to insert seat");
            seat_ids.push(seat_id);
        }
    }
    seat_ids
}

/// Create a user with a throwaway hash (these tests never log in)
async fn create_user(pool: &SqlitePool, username: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO user (username, password_hash, role_id)
         SELECT ?, 'not-a-real-hash', role_id FROM role WHERE name = 'normal'
         RETURNING user_id",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("Failed to insert user")
}

async fn statuses_of(pool: &SqlitePool, seat_ids: &[i64]) -> Vec<(i64, SeatStatus)> {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let mut rows: Vec<(i64, SeatStatus)> = seat::status_of(&mut conn, seat_ids)
        .await
        .expect("Failed to read seat statuses")
        .into_iter()
        .map(|r| (r.seat_id, r.status))
        .collect();
    rows.sort_by_key(|&(id, _)| id);
    rows
}

#[tokio::test]
async fn explicit_reservation_marks_seats_and_creates_ticket() {
    let (_dir, pool) = setup().await;
    let seats = create_concert(&pool, 100, 2, 5).await;
    let user = create_user(&pool, "carol").await;

    let picked = &seats[0..2];
    let ticket_id = reservation::reserve(&pool, 100, user, picked)
        .await
        .expect("Reservation should succeed");
    assert!(ticket_id > 0);

    let map = seat::seat_map(&pool, 100).await.expect("seat map");
    assert_eq!(map.total_seats, 10);
    assert_eq!(map.occupied_seats, 2);
    assert_eq!(map.available_seats, 8);

    for (seat_id, status) in statuses_of(&pool, picked).await {
        assert_eq!(status, SeatStatus::Occupied, "seat {seat_id} should be occupied");
    }

    let summaries = ticket::reservations_for_user(&pool, user)
        .await
        .expect("reservations");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].ticket_id, ticket_id);
    assert_eq!(summaries[0].seat_count, 2);
}

#[tokio::test]
async fn second_reservation_for_same_concert_is_rejected() {
    let (_dir, pool) = setup().await;
    let seats = create_concert(&pool, 101, 2, 5).await;
    let user = create_user(&pool, "carol").await;

    reservation::reserve(&pool, 101, user, &seats[0..2])
        .await
        .expect("First reservation should succeed");

    // Different seats, same concert: still rejected, nothing mutated
    let err = reservation::reserve(&pool, 101, user, &seats[4..6])
        .await
        .expect_err("Second reservation must fail");
    assert!(matches!(err, ReservationError::DuplicateReservation));

    let map = seat::seat_map(&pool, 101).await.expect("seat map");
    assert_eq!(map.occupied_seats, 2);
}

#[tokio::test]
async fn conflict_reports_exactly_the_occupied_seats() {
    let (_dir, pool) = setup().await;
    let seats = create_concert(&pool, 102, 2, 5).await;
    let alice = create_user(&pool, "carol").await;
    let bob = create_user(&pool, "dave").await;

    let seat7 = seats[6];
    let seat6 = seats[5];
    reservation::reserve(&pool, 102, alice, &[seat7])
        .await
        .expect("First reservation should succeed");

    let err = reservation::reserve(&pool, 102, bob, &[seat6, seat7])
        .await
        .expect_err("Overlapping reservation must fail");
    match err {
        ReservationError::SeatConflict { occupied } => assert_eq!(occupied, vec![seat7]),
        other => panic!("expected SeatConflict, got {other:?}"),
    }

    // The non-conflicting seat of the failed batch was rolled back
    let statuses = statuses_of(&pool, &[seat6]).await;
    assert_eq!(statuses[0].1, SeatStatus::Available);

    let map = seat::seat_map(&pool, 102).await.expect("seat map");
    assert_eq!(map.occupied_seats, 1);
    assert!(
        ticket::reservations_for_user(&pool, bob)
            .await
            .expect("reservations")
            .is_empty()
    );
}

#[tokio::test]
async fn empty_selection_is_rejected() {
    let (_dir, pool) = setup().await;
    create_concert(&pool, 103, 1, 2).await;
    let user = create_user(&pool, "carol").await;

    let err = reservation::reserve(&pool, 103, user, &[])
        .await
        .expect_err("Empty selection must fail");
    assert!(matches!(err, ReservationError::EmptySeatSelection));
}

#[tokio::test]
async fn unknown_seat_ids_fail_without_mutation() {
    let (_dir, pool) = setup().await;
    let seats = create_concert(&pool, 104, 1, 4).await;
    let user = create_user(&pool, "carol").await;

    let missing = 999_999;
    let err = reservation::reserve(&pool, 104, user, &[seats[0], missing])
        .await
        .expect_err("Reservation with unknown seat must fail");
    match err {
        ReservationError::SeatConflict { occupied } => assert_eq!(occupied, vec![missing]),
        other => panic!("expected SeatConflict, got {other:?}"),
    }

    let map = seat::seat_map(&pool, 104).await.expect("seat map");
    assert_eq!(map.occupied_seats, 0);
}

#[tokio::test]
async fn random_reservation_grants_the_requested_count() {
    let (_dir, pool) = setup().await;
    create_concert(&pool, 105, 2, 5).await;
    let user = create_user(&pool, "carol").await;

    let granted = reservation::reserve_random(&pool, 105, user, 4)
        .await
        .expect("Random reservation should succeed");

    assert_eq!(granted.seats.len(), 4);
    let mut ids: Vec<i64> = granted.seats.iter().map(|s| s.seat_id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4, "granted seats must be distinct");
    assert!(granted.seats.iter().all(|s| s.status == SeatStatus::Occupied));

    let map = seat::seat_map(&pool, 105).await.expect("seat map");
    assert_eq!(map.occupied_seats, 4);
    assert_eq!(map.available_seats, 6);

    for (_, status) in statuses_of(&pool, &ids).await {
        assert_eq!(status, SeatStatus::Occupied);
    }
}

#[tokio::test]
async fn random_reservation_with_insufficient_capacity_mutates_nothing() {
    let (_dir, pool) = setup().await;
    create_concert(&pool, 106, 2, 5).await;
    let carol = create_user(&pool, "carol").await;
    let dave = create_user(&pool, "dave").await;

    let err = reservation::reserve_random(&pool, 106, carol, 11)
        .await
        .expect_err("Requesting 11 of 10 seats must fail");
    assert!(matches!(
        err,
        ReservationError::InsufficientCapacity {
            requested: 11,
            available: 10
        }
    ));

    let map = seat::seat_map(&pool, 106).await.expect("seat map");
    assert_eq!(map.occupied_seats, 0);

    // Capacity shrinks as seats are claimed
    reservation::reserve_random(&pool, 106, carol, 2)
        .await
        .expect("Reservation should succeed");
    let err = reservation::reserve_random(&pool, 106, dave, 9)
        .await
        .expect_err("Only 8 seats remain");
    assert!(matches!(
        err,
        ReservationError::InsufficientCapacity {
            requested: 9,
            available: 8
        }
    ));
}

#[tokio::test]
async fn cancel_releases_exactly_the_linked_seats() {
    let (_dir, pool) = setup().await;
    let seats = create_concert(&pool, 107, 2, 5).await;
    let carol = create_user(&pool, "carol").await;
    let dave = create_user(&pool, "dave").await;

    let carol_ticket = reservation::reserve(&pool, 107, carol, &seats[0..2])
        .await
        .expect("Reservation should succeed");
    reservation::reserve(&pool, 107, dave, &seats[2..3])
        .await
        .expect("Reservation should succeed");

    let changes = reservation::cancel(&pool, carol_ticket, carol)
        .await
        .expect("Cancel should succeed");
    assert_eq!(changes, 1);

    let map = seat::seat_map(&pool, 107).await.expect("seat map");
    assert_eq!(map.occupied_seats, 1, "only dave's seat stays occupied");
    let statuses = statuses_of(&pool, &seats[0..3]).await;
    assert_eq!(statuses[0].1, SeatStatus::Available);
    assert_eq!(statuses[1].1, SeatStatus::Available);
    assert_eq!(statuses[2].1, SeatStatus::Occupied);

    // Idempotence: the ticket is gone, so a second cancel fails
    let err = reservation::cancel(&pool, carol_ticket, carol)
        .await
        .expect_err("Second cancel must fail");
    assert!(matches!(err, ReservationError::NotOwner));

    // The user can reserve this concert again after cancelling
    reservation::reserve(&pool, 107, carol, &seats[5..6])
        .await
        .expect("Re-reservation after cancel should succeed");
}

#[tokio::test]
async fn cancel_requires_ownership_and_hides_existence() {
    let (_dir, pool) = setup().await;
    let seats = create_concert(&pool, 108, 1, 4).await;
    let carol = create_user(&pool, "carol").await;
    let dave = create_user(&pool, "dave").await;

    let ticket_id = reservation::reserve(&pool, 108, carol, &seats[0..2])
        .await
        .expect("Reservation should succeed");

    let err = reservation::cancel(&pool, ticket_id, dave)
        .await
        .expect_err("Foreign cancel must fail");
    assert!(matches!(err, ReservationError::NotOwner));

    // Nonexistent ticket is indistinguishable from a foreign one
    let err = reservation::cancel(&pool, 424242, dave)
        .await
        .expect_err("Cancel of unknown ticket must fail");
    assert!(matches!(err, ReservationError::NotOwner));

    let map = seat::seat_map(&pool, 108).await.expect("seat map");
    assert_eq!(map.occupied_seats, 2);
}

#[tokio::test]
async fn concurrent_overlapping_reservations_have_a_single_winner() {
    let (_dir, pool) = setup().await;
    let seats = create_concert(&pool, 109, 2, 5).await;

    let contested = vec![seats[3], seats[4]];
    let mut users = Vec::new();
    for i in 0..5 {
        users.push(create_user(&pool, &format!("racer{i}")).await);
    }

    let mut handles = Vec::new();
    for user in users {
        let pool = pool.clone();
        let target = contested.clone();
        handles.push(tokio::spawn(async move {
            reservation::reserve(&pool, 109, user, &target).await
        }));
    }

    let mut winners = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => winners += 1,
            Err(ReservationError::SeatConflict { occupied }) => {
                let mut occupied = occupied;
                occupied.sort_unstable();
                assert_eq!(occupied, contested, "losers must see the claimed seats");
                conflicts += 1;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(winners, 1, "exactly one transaction wins");
    assert_eq!(conflicts, 4);

    let map = seat::seat_map(&pool, 109).await.expect("seat map");
    assert_eq!(
        map.occupied_seats, 2,
        "occupied count equals the single winner's claim"
    );
}
