use assetpipe::engine::{
    CoreCommand, CoreRuntime, RuntimeEvent, RuntimeOptions, TaskOutcome, TriggerReason,
};
use assetpipe::types::{AssetGroup, TriggerWhileRunningBehaviour};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Trigger(AssetGroup),
    Complete(AssetGroup, bool),
}

fn group_strategy() -> impl Strategy<Value = AssetGroup> {
    prop_oneof![
        Just(AssetGroup::Styles),
        Just(AssetGroup::Scripts),
        Just(AssetGroup::Templates),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        group_strategy().prop_map(Op::Trigger),
        (group_strategy(), any::<bool>()).prop_map(|(g, ok)| Op::Complete(g, ok)),
    ]
}

proptest! {
    #[test]
    fn test_queue_mode_never_overlaps_a_group(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut core = CoreRuntime::new(TriggerWhileRunningBehaviour::Queue, RuntimeOptions::default());

        for op in ops {
            let event = match op {
                Op::Trigger(group) => RuntimeEvent::TaskTriggered { group, reason: TriggerReason::FileWatch },
                Op::Complete(group, ok) => RuntimeEvent::TaskCompleted {
                    group,
                    outcome: if ok { TaskOutcome::Success } else { TaskOutcome::Failed },
                },
            };
            let was_running = match &event {
                RuntimeEvent::TaskCompleted { group, .. } => core.in_flight(*group) > 0,
                _ => false,
            };

            let step = core.step(event.clone());

            for group in AssetGroup::ALL {
                prop_assert!(core.in_flight(group) <= 1);
            }

            // Reloads only ever follow a successful run that was in flight.
            let reloads = step.commands.iter().filter(|c| matches!(c, CoreCommand::SignalReload(_))).count();
            match event {
                RuntimeEvent::TaskCompleted { outcome: TaskOutcome::Success, .. } if was_running => {
                    prop_assert_eq!(reloads, 1)
                }
                _ => prop_assert_eq!(reloads, 0),
            }
            prop_assert!(step.keep_running);
        }
    }

    #[test]
    fn test_parallel_mode_dispatches_every_trigger(triggers in proptest::collection::vec(group_strategy(), 0..32)) {
        let mut core = CoreRuntime::new(TriggerWhileRunningBehaviour::Parallel, RuntimeOptions::default());

        let mut dispatched = 0usize;
        for group in &triggers {
            let step = core.step(RuntimeEvent::TaskTriggered { group: *group, reason: TriggerReason::Manual });
            dispatched += step.commands.len();
        }

        prop_assert_eq!(dispatched, triggers.len());
        prop_assert!(core.queue_is_empty());
    }
}
