use super::*;

#[test]
fn fleet_has_eight_miners() {
    assert_eq!(fleet().len(), 8);
}

#[test]
fn stats_aggregate_the_fleet() {
    let stats = stats();
    assert_eq!(stats.total, 8);
    assert_eq!(stats.busy, 5);
    assert_eq!(stats.idle, 3);
    assert!((stats.total_earnings - 91.2).abs() < 1e-9);
}

#[test]
fn filter_none_is_the_whole_fleet() {
    assert_eq!(filter_by_status(None).len(), 8);
}

#[test]
fn filter_by_status_partitions_the_fleet() {
    let busy = filter_by_status(Some(MinerStatus::Busy));
    let idle = filter_by_status(Some(MinerStatus::Idle));

    assert_eq!(busy.len() + idle.len(), fleet().len());
    assert!(busy.iter().all(|m| m.status == MinerStatus::Busy));
    assert!(idle.iter().all(|m| m.status == MinerStatus::Idle));
}

#[test]
fn status_parses_case_insensitively() {
    assert_eq!("busy".parse::<MinerStatus>().unwrap(), MinerStatus::Busy);
    assert_eq!(" IDLE ".parse::<MinerStatus>().unwrap(), MinerStatus::Idle);
    assert!("offline".parse::<MinerStatus>().is_err());
}

#[test]
fn usage_is_a_percentage() {
    assert!(fleet().iter().all(|m| m.usage <= 100));
}
