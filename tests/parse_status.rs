use xrandr_menu::{ActiveMode, Resolution, Topology, parse_status};

const STATUS: &str = "\
Screen 0: minimum 8 x 8, current 3200 x 1080, maximum 32767 x 32767
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+  50.00
   1280x720      60.00    50.00
VGA1 disconnected (normal left inverted right x axis y axis)
";

#[test]
fn test_parse_status_functionality() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let topology = Topology::from_status(STATUS)?;
    println!("Parsed topology:\n{}", topology);

    assert_eq!(topology.outputs().count(), 2, "One output per header line");

    let hdmi = topology.find("HDMI1").expect("HDMI1 should be reported");
    assert!(hdmi.is_connected());
    assert!(hdmi.is_active());
    assert_eq!(
        hdmi.current_mode(),
        Some(ActiveMode::Mode(Resolution::new(1920, 1080)))
    );
    assert_eq!(
        hdmi.modes().to_vec(),
        vec![Resolution::new(1920, 1080), Resolution::new(1280, 720)],
        "Mode block entries in the order reported"
    );

    let vga = topology.find("VGA1").expect("VGA1 should be reported");
    assert!(!vga.is_connected());
    assert!(!vga.is_active());
    assert_eq!(vga.current_mode(), None);

    Ok(())
}

#[test]
fn test_connected_inactive_output() -> Result<(), Box<dyn std::error::Error>> {
    let status = "\
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+
VGA1 connected (normal left inverted right x axis y axis) 340mm x 270mm
   1024x768      60.00
   800x600       60.32
";

    let topology = Topology::from_status(status)?;
    let vga = topology.find("VGA1").expect("VGA1 should be reported");

    assert!(vga.is_connected());
    assert!(!vga.is_active(), "No geometry token means inactive");
    assert_eq!(vga.current_mode(), None);
    assert_eq!(vga.modes().len(), 2, "Mode block still belongs to VGA1");

    Ok(())
}

#[test]
fn test_primary_token_is_tolerated() -> Result<(), Box<dyn std::error::Error>> {
    let status = "\
eDP1 connected primary 2560x1440+0+0 (normal left inverted right x axis y axis) 310mm x 170mm
   2560x1440     60.01*+
";

    let topology = Topology::from_status(status)?;
    let edp = topology.find("eDP1").expect("eDP1 should be reported");

    assert!(edp.is_active(), "Geometry after `primary` still counts");
    assert_eq!(
        edp.current_mode(),
        Some(ActiveMode::Mode(Resolution::new(2560, 1440)))
    );

    Ok(())
}

#[test]
fn test_interlaced_mode_suffix() -> Result<(), Box<dyn std::error::Error>> {
    let status = "\
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+
   1920x1080i    30.00
";

    let topology = Topology::from_status(status)?;
    let hdmi = topology.find("HDMI1").expect("HDMI1 should be reported");

    assert_eq!(
        hdmi.modes().to_vec(),
        vec![Resolution::new(1920, 1080), Resolution::new(1920, 1080)],
        "The interlace suffix is not part of the resolution"
    );

    Ok(())
}

#[test]
fn test_active_iff_current_mode_present() -> Result<(), Box<dyn std::error::Error>> {
    let outputs = parse_status(STATUS)?;

    for output in &outputs {
        assert_eq!(
            output.active.get(),
            output.current_mode.borrow().is_some(),
            "Output {} violates the active/mode invariant",
            output.name
        );
    }

    Ok(())
}

#[test]
fn test_malformed_header_is_an_error() {
    let status = "\
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+
THIS-IS NOT-A-HEADER at all
";

    let err = parse_status(status).expect_err("malformed header should be rejected");
    assert!(
        err.to_string().contains("THIS-IS NOT-A-HEADER"),
        "Error should surface the offending line, got: {}",
        err
    );
}

#[test]
fn test_mode_line_without_header_is_an_error() {
    let status = "1920x1080     60.00*+\n";

    assert!(
        parse_status(status).is_err(),
        "A mode line cannot open the report"
    );
}
