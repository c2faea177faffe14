use std::thread;

use mmu::{EventLog, Mmu, MmuError, PagingEvent, PolicyKind, SharedMmu};
use paging_sim::generator::AddressGenerator;
use rand::Rng;

const POLICIES: [PolicyKind; 3] = [PolicyKind::Fifo, PolicyKind::Lru, PolicyKind::RoundRobin];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn with_log<const P: usize, const F: usize, const N: usize, const M: usize>(
    policy: PolicyKind,
) -> (Mmu<P, F, N, M>, EventLog) {
    let log = EventLog::new();
    (Mmu::init(policy.build(), Box::new(log.clone())), log)
}

#[test]
fn random_workload_keeps_bijection_and_bounds() {
    init_logger();
    for policy in POLICIES {
        let (mut mmu, _log) = with_log::<256, 1024, 1024, 8>(policy);
        let mut generator = AddressGenerator::new(1024 * 256, Some(1234));
        let highest = 7 * 1024 + 255;

        for address in generator.by_ref().take(2000) {
            let physical = mmu.translate(address).unwrap();
            assert!(physical <= highest);
            assert_eq!(physical % 1024, address as usize % 256);
            mmu.check_consistency().unwrap();
            assert!(mmu.memory().occupied() <= 8);
        }
        assert_eq!(mmu.stats().translations, 2000);
        assert_eq!(mmu.page_table().resident_count(), 8);
    }
}

#[test]
fn hit_path_is_idempotent() {
    init_logger();
    let mut rng = rand::thread_rng();
    for policy in POLICIES {
        let (mut mmu, log) = with_log::<4, 16, 64, 4>(policy);
        for _ in 0..200 {
            let address = rng.gen_range(0..256);
            let first = mmu.translate(address).unwrap();
            log.take();
            let second = mmu.translate(address).unwrap();
            assert_eq!(first, second);
            let events = log.take();
            assert_eq!(events.len(), 1);
            assert!(!events[0].is_fault());
        }
    }
}

#[test]
fn cold_fault_on_fresh_unit() {
    for policy in POLICIES {
        let (mut mmu, log) = with_log::<4, 16, 8, 2>(policy);
        let physical = mmu.translate(21).unwrap();
        assert_eq!(log.faults(), vec![PagingEvent::ColdFault { page: 5, frame: 0 }]);
        assert_eq!(mmu.frame_of(5), Ok(Some(0)));
        assert_eq!(physical, 1);
    }
}

#[test]
fn eviction_once_memory_is_full() {
    for policy in POLICIES {
        let (mut mmu, log) = with_log::<4, 16, 16, 4>(policy);
        for page in 0..4 {
            mmu.load_page(page).unwrap();
        }
        assert!(mmu.memory().is_full());
        log.take();

        let frame = mmu.load_page(9).unwrap();
        let faults = log.faults();
        assert_eq!(faults.len(), 1);
        let evicted_page = match faults[0] {
            PagingEvent::EvictionFault {
                evicted_page,
                new_page: 9,
                frame: evicted_frame,
            } if evicted_frame == frame => evicted_page,
            other => panic!("{:?}: unexpected fault {:?}", policy, other),
        };
        assert_eq!(mmu.frame_of(evicted_page), Ok(None));
        assert_eq!(mmu.frame_of(9), Ok(Some(frame)));
        assert_eq!(mmu.occupant(frame), Ok(Some(9)));
        mmu.check_consistency().unwrap();
    }
}

#[test]
fn fifo_scenario_two_frames() {
    let (mut mmu, log) = with_log::<4, 16, 8, 2>(PolicyKind::Fifo);
    assert_eq!(mmu.load_page(0), Ok(0));
    assert_eq!(mmu.load_page(1), Ok(1));
    assert_eq!(mmu.load_page(2), Ok(0));
    assert_eq!(
        log.faults(),
        vec![
            PagingEvent::ColdFault { page: 0, frame: 0 },
            PagingEvent::ColdFault { page: 1, frame: 1 },
            PagingEvent::EvictionFault {
                evicted_page: 0,
                new_page: 2,
                frame: 0
            },
        ]
    );
    assert_eq!(mmu.translate(9), Ok(1));
}

#[test]
fn rejected_addresses_leave_state_untouched() {
    let (mut mmu, log) = with_log::<4, 16, 8, 2>(PolicyKind::Fifo);
    mmu.translate(0).unwrap();
    mmu.translate(4).unwrap();
    let table = mmu.page_table().clone();
    let memory = mmu.memory().clone();
    log.take();

    for address in [-1, 32, i64::MIN, i64::MAX] {
        assert_eq!(mmu.translate(address), Err(MmuError::AddressOutOfRange(address)));
    }
    assert_eq!(mmu.page_table(), &table);
    assert_eq!(mmu.memory(), &memory);
    assert!(log.is_empty());
}

#[test]
fn concurrent_translators_share_one_unit() {
    init_logger();
    let shared = SharedMmu::new(Mmu::<4, 16, 64, 4>::init(
        PolicyKind::Lru.build(),
        Box::new(EventLog::new()),
    ));

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut generator = AddressGenerator::new(256, Some(seed));
                for address in generator.by_ref().take(500) {
                    let physical = shared.translate(address).unwrap();
                    assert!(physical <= 3 * 16 + 3);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    shared.check_consistency().unwrap();
    let stats = shared.stats().unwrap();
    assert_eq!(stats.translations, 2000);
    assert_eq!(stats.hits + stats.faults(), 2000);
}
