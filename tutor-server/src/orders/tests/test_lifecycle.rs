use super::*;
use crate::db::models::OrderStatus;

#[tokio::test]
async fn test_book_pay_complete_flow() {
    let (backend, teacher, student, course) = seed_marketplace(50.0).await;

    // Book: pending, amount snapshots the course price
    let order = backend
        .state
        .orders
        .create(&student, booking(&course))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.amount, 50.0);
    assert!(order.payment_time.is_none());
    let order_id = order.id.unwrap().to_string();

    // Pay: paid, payment time recorded
    let paid = backend.state.orders.pay(&order_id, &student).await.unwrap();
    assert_eq!(paid.status, OrderStatus::Paid);
    assert!(paid.payment_time.is_some());

    // Complete: completed, completion time recorded
    let completed = backend
        .state
        .orders
        .complete(&order_id, &teacher)
        .await
        .unwrap();
    assert_eq!(completed.status, OrderStatus::Completed);
    assert!(completed.completion_time.is_some());
}

#[tokio::test]
async fn test_complete_requires_paid() {
    // pending → completed directly is never legal
    let (backend, teacher, student, course) = seed_marketplace(50.0).await;
    let order_id = backend.book(&student, &course).await;

    let err = backend
        .state
        .orders
        .complete(&order_id, &teacher)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_pay_twice_is_not_idempotent() {
    let (backend, _teacher, student, course) = seed_marketplace(50.0).await;
    let order_id = backend.paid_order(&student, &course).await;

    let err = backend
        .state
        .orders
        .pay(&order_id, &student)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_student_cancels_pending() {
    let (backend, _teacher, student, course) = seed_marketplace(50.0).await;
    let order_id = backend.book(&student, &course).await;

    let cancelled = backend
        .state
        .orders
        .cancel(&order_id, &student, Some("schedule conflict".to_string()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(cancelled.cancellation_time.is_some());
    assert_eq!(
        cancelled.cancellation_reason.as_deref(),
        Some("schedule conflict")
    );
}

#[tokio::test]
async fn test_teacher_cancels_paid() {
    let (backend, teacher, student, course) = seed_marketplace(50.0).await;
    let order_id = backend.paid_order(&student, &course).await;

    let cancelled = backend
        .state
        .orders
        .cancel(&order_id, &teacher, Some("illness".to_string()))
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
}

#[tokio::test]
async fn test_terminal_states_admit_no_transition() {
    let (backend, teacher, student, course) = seed_marketplace(50.0).await;
    let order_id = backend.completed_order(&student, &teacher, &course).await;

    // completed is terminal
    let err = backend
        .state
        .orders
        .cancel(&order_id, &student, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));

    // cancelled is terminal
    let course2 = backend.create_course(&teacher, 30.0).await;
    let order2 = backend.book(&student, &course2).await;
    backend
        .state
        .orders
        .cancel(&order2, &student, None)
        .await
        .unwrap();
    let err = backend.state.orders.pay(&order2, &student).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn test_get_detail_reflects_lifecycle() {
    let (backend, teacher, student, course) = seed_marketplace(80.0).await;
    let order_id = backend.paid_order(&student, &course).await;

    let detail = backend.state.orders.get(&order_id, &student).await.unwrap();
    assert_eq!(detail.status, OrderStatus::Paid);
    assert_eq!(detail.amount, 80.0);
    assert_eq!(detail.course_title, "Algebra Basics");
    assert!(!detail.has_review());

    // The course teacher sees the same order
    let detail = backend.state.orders.get(&order_id, &teacher).await.unwrap();
    assert_eq!(detail.order_id, order_id);
}

#[tokio::test]
async fn test_student_orders_listing() {
    let (backend, teacher, student, course) = seed_marketplace(50.0).await;
    let course2 = backend.create_course(&teacher, 60.0).await;
    backend.book(&student, &course).await;
    let paid = backend.paid_order(&student, &course2).await;

    let all = backend
        .state
        .orders
        .student_orders(&student, None, None, &Default::default())
        .await
        .unwrap();
    assert_eq!(all.total, 2);
    assert_eq!(all.items.len(), 2);

    let paid_only = backend
        .state
        .orders
        .student_orders(
            &student,
            Some(OrderStatus::Paid),
            None,
            &Default::default(),
        )
        .await
        .unwrap();
    assert_eq!(paid_only.total, 1);
    assert_eq!(paid_only.items[0].order_id, paid);
}

#[tokio::test]
async fn test_teacher_orders_listing() {
    let (backend, teacher, student, course) = seed_marketplace(50.0).await;
    let student2 = backend.create_user("student2", UserRole::Student).await;
    backend.book(&student, &course).await;
    backend.book(&student2, &course).await;

    let orders = backend
        .state
        .orders
        .teacher_orders(&teacher, None, None, &Default::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 2);
}
