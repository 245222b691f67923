// Sample source tests against the running test process

use statseries::config::SubjectConfig;
use statseries::sysinfo_repo::{ProcessSelector, SampleSource, SysinfoSource};

#[test]
fn test_sample_own_process_by_pid() {
    let pid = std::process::id();
    let source = SysinfoSource::new(ProcessSelector::Pid(pid), "no-such-disk", "no-such-if");

    let sample = source.sample(1_700_000_000_123_456_789).unwrap();
    assert_eq!(sample.unix_second, 1_700_000_000);
    assert_eq!(sample.proc.pid, pid as i64);
    assert!(!sample.proc.program.is_empty());
    assert!(sample.proc.cpu.ends_with(" %"));
    // unknown devices still report the configured names with zero counters
    assert_eq!(sample.disk.device, "no-such-disk");
    assert_eq!(sample.disk.sectors_read, 0);
    assert_eq!(sample.net.interface, "no-such-if");
    assert_eq!(sample.net.receive_bytes, "0 B");
}

#[test]
fn test_sample_unknown_pid_fails() {
    let source = SysinfoSource::new(ProcessSelector::Pid(u32::MAX - 1), "sda", "eth0");
    assert!(source.sample(0).is_err());
}

#[test]
fn test_sample_unknown_program_fails() {
    let source = SysinfoSource::new(
        ProcessSelector::Program("statseries-no-such-program".into()),
        "sda",
        "eth0",
    );
    let err = source.sample(0).unwrap_err();
    assert!(err.to_string().contains("statseries-no-such-program"));
}

#[test]
fn test_from_config_requires_a_single_selector() {
    let subject = SubjectConfig {
        pid: None,
        program: None,
        disk_device: "sda".into(),
        network_interface: "eth0".into(),
    };
    assert!(SysinfoSource::from_config(&subject).is_err());

    let subject = SubjectConfig {
        pid: Some(1),
        ..subject
    };
    assert!(SysinfoSource::from_config(&subject).is_ok());
}
