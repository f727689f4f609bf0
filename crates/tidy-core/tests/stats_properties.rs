use proptest::prelude::*;
use tidy_core::app::{Tidy, TidyOptions};
use tidy_core::models::{NewCategoryData, NewTaskData, UpdateTaskData, DEFAULT_CATEGORY_ID};
use tidy_core::storage::KeyValueStore;

#[derive(Debug, Clone)]
enum Op {
    Create { title: String, in_category: bool },
    Toggle(usize),
    Rename(usize, String),
    Delete(usize),
    ClearCompleted,
    DeleteCategory,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => ("[a-z ]{0,12}", any::<bool>())
            .prop_map(|(title, in_category)| Op::Create { title, in_category }),
        3 => any::<usize>().prop_map(Op::Toggle),
        1 => (any::<usize>(), "[a-z]{1,8}").prop_map(|(i, t)| Op::Rename(i, t)),
        2 => any::<usize>().prop_map(Op::Delete),
        1 => Just(Op::ClearCompleted),
        1 => Just(Op::DeleteCategory),
    ]
}

async fn run_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let tidy = Tidy::open(KeyValueStore::in_memory(), TidyOptions::default()).await;
    let mut category_id = tidy
        .categories()
        .create(NewCategoryData {
            name: "Work".to_string(),
            color: "#e74c3c".to_string(),
        })
        .await
        .map_err(|e| TestCaseError::fail(e.to_string()))?
        .id;

    for op in ops {
        let ids: Vec<String> = tidy.tasks().all().into_iter().map(|t| t.id).collect();
        let pick = |i: usize| ids.get(i % ids.len().max(1)).cloned();

        match op {
            Op::Create { title, in_category } => {
                let category = if in_category { category_id.clone() } else { "missing".to_string() };
                let result = tidy
                    .tasks()
                    .create(NewTaskData {
                        title: title.clone(),
                        description: String::new(),
                        category_id: category,
                    })
                    .await;
                prop_assert_eq!(result.is_ok(), !title.trim().is_empty());
            }
            Op::Toggle(i) => {
                if let Some(id) = pick(i) {
                    tidy.tasks().toggle_completed(&id).await.unwrap();
                }
            }
            Op::Rename(i, title) => {
                if let Some(id) = pick(i) {
                    let update = UpdateTaskData {
                        title: Some(title),
                        ..Default::default()
                    };
                    tidy.tasks().update(&id, update).await.unwrap();
                }
            }
            Op::Delete(i) => {
                if let Some(id) = pick(i) {
                    tidy.tasks().delete(&id).await.unwrap();
                }
            }
            Op::ClearCompleted => {
                tidy.tasks().clear_completed().await.unwrap();
                prop_assert_eq!(tidy.tasks().stats().completed, 0);
            }
            Op::DeleteCategory => {
                if category_id != DEFAULT_CATEGORY_ID {
                    tidy.delete_category(&category_id).await.unwrap();
                    prop_assert!(tidy.tasks().all().iter().all(|t| t.category_id != category_id));
                    category_id = DEFAULT_CATEGORY_ID.to_string();
                }
            }
        }

        let stats = tidy.tasks().stats();
        prop_assert_eq!(stats.total, tidy.tasks().all().len());
        prop_assert_eq!(stats.completed + stats.pending, stats.total);
        prop_assert_eq!(stats.by_category.values().sum::<usize>(), stats.total);
    }

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stats_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(run_ops(ops))?;
    }
}
