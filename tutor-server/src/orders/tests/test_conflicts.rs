use super::*;
use crate::db::models::ReviewCreate;

#[tokio::test]
async fn test_duplicate_booking_is_a_conflict() {
    let (backend, _teacher, student, course) = seed_marketplace(50.0).await;
    backend.book(&student, &course).await;

    let err = backend
        .state
        .orders
        .create(&student, booking(&course))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_paid_order_still_blocks_rebooking() {
    let (backend, _teacher, student, course) = seed_marketplace(50.0).await;
    backend.paid_order(&student, &course).await;

    let err = backend
        .state
        .orders
        .create(&student, booking(&course))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_rebooking_after_cancellation_is_allowed() {
    let (backend, _teacher, student, course) = seed_marketplace(50.0).await;
    let order_id = backend.book(&student, &course).await;
    backend
        .state
        .orders
        .cancel(&order_id, &student, None)
        .await
        .unwrap();

    // The cancelled order no longer counts against the invariant
    let order = backend
        .state
        .orders
        .create(&student, booking(&course))
        .await
        .unwrap();
    assert_eq!(order.amount, 50.0);
}

#[tokio::test]
async fn test_two_students_may_book_the_same_course() {
    let (backend, _teacher, student, course) = seed_marketplace(50.0).await;
    let student2 = backend.create_user("student2", UserRole::Student).await;

    backend.book(&student, &course).await;
    backend.book(&student2, &course).await;
}

#[tokio::test]
async fn test_booking_unknown_course_is_not_found() {
    let backend = backend().await;
    let student = backend.create_user("student1", UserRole::Student).await;

    let err = backend
        .state
        .orders
        .create(&student, booking("course:doesnotexist"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_detail_carries_review_once_written() {
    let (backend, teacher, student, course) = seed_marketplace(50.0).await;
    let order_id = backend.completed_order(&student, &teacher, &course).await;

    backend
        .state
        .reviews
        .create(
            &student,
            ReviewCreate {
                order_id: order_id.clone(),
                rating: 4,
                content: "Great classes".to_string(),
            },
        )
        .await
        .unwrap();

    let detail = backend.state.orders.get(&order_id, &student).await.unwrap();
    assert!(detail.has_review());
    assert_eq!(detail.review.as_ref().unwrap().rating, 4);
}
