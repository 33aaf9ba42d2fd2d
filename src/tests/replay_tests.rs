use crate::config::NavigationConfig;
use crate::constants::DEFAULT_SECTION_IDS;
use crate::replay::{parse_script, run, Transition};
use crate::slide::SlideSequence;

fn replay(script: &str) -> crate::replay::ReplayReport {
    let events = parse_script(script).unwrap();
    let slides = SlideSequence::new(DEFAULT_SECTION_IDS).unwrap();
    run(&events, slides, NavigationConfig::default()).unwrap()
}

#[test]
fn three_quick_presses_land_on_the_second_slide() {
    let report = replay("0 key ArrowDown\n50 key ArrowDown\n100 key ArrowDown\n");
    assert_eq!(report.final_index, 1);
    assert_eq!(
        report.transitions,
        vec![Transition {
            at_ms: 0,
            index: 1,
            slide: "pain-point".into(),
        }]
    );
    assert_eq!(report.handled, 3);
}

#[test]
fn press_wait_press_lands_on_the_third_slide() {
    let report = replay("0 key ArrowDown\n1200 key ArrowDown\n");
    assert_eq!(report.final_index, 2);
    let at: Vec<u64> = report.transitions.iter().map(|t| t.at_ms).collect();
    assert_eq!(at, vec![0, 1200]);
}

#[test]
fn mixed_script_counts_ignored_input() {
    let report = replay(
        "\
        0    wheel 5\n\
        10   key ArrowDown text-input\n\
        20   key Escape\n\
        30   wheel 50\n\
        1100 tick\n\
        1200 goto 9\n\
        1300 goto 6\n\
        2400 key Home\n",
    );
    // goto 9 is outside the deck
    assert_eq!(report.ignored, 4);
    assert_eq!(report.handled, 3);
    let indices: Vec<usize> = report.transitions.iter().map(|t| t.index).collect();
    assert_eq!(indices, vec![1, 6, 0]);
    assert_eq!(report.final_index, 0);
}

#[test]
fn custom_cool_down_is_honoured() {
    let events = parse_script("0 key ArrowDown\n300 key ArrowDown\n").unwrap();
    let slides = SlideSequence::new(["a", "b", "c"]).unwrap();
    let config = NavigationConfig {
        cool_down: std::time::Duration::from_millis(250),
        ..NavigationConfig::default()
    };
    let report = run(&events, slides, config).unwrap();
    assert_eq!(report.final_index, 2);
}
