use xrandr_menu::{Action, Topology, TopologyError};

const ONE_ACTIVE: &str = "\
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+
   1280x720      60.00
VGA1 disconnected (normal left inverted right x axis y axis)
";

const TWO_ACTIVE: &str = "\
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+
DP1 connected 2560x1440+1920+0 (normal left inverted right x axis y axis) 597mm x 336mm
   2560x1440     59.95*+
   1920x1080     60.00
";

#[test]
fn test_available_actions_functionality() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::builder().is_test(true).try_init();

    let topology = Topology::from_status(ONE_ACTIVE)?;
    println!("Parsed topology:\n{}", topology);

    let hdmi = topology.find("HDMI1").expect("HDMI1 should be reported");
    assert_eq!(
        hdmi.available_actions()?,
        vec![Action::Deactivate, Action::ChangeResolution]
    );

    let vga = topology.find("VGA1").expect("VGA1 should be reported");
    assert!(
        matches!(
            vga.available_actions(),
            Err(TopologyError::NotConnected(name)) if name == "VGA1"
        ),
        "Actions for a disconnected output are an invalid request"
    );

    Ok(())
}

#[test]
fn test_single_mode_output_has_no_resolution_action() -> Result<(), Box<dyn std::error::Error>> {
    let status = "\
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+
";

    let topology = Topology::from_status(status)?;
    let hdmi = topology.find("HDMI1").expect("HDMI1 should be reported");

    assert_eq!(
        hdmi.available_actions()?,
        vec![Action::Deactivate],
        "A single reported mode leaves nothing to switch to"
    );

    Ok(())
}

#[test]
fn test_inactive_output_offers_activation() -> Result<(), Box<dyn std::error::Error>> {
    let status = "\
HDMI1 connected 1920x1080+0+0 (normal left inverted right x axis y axis) 509mm x 286mm
   1920x1080     60.00*+
VGA1 connected (normal left inverted right x axis y axis) 340mm x 270mm
   1024x768      60.00
";

    let topology = Topology::from_status(status)?;
    let vga = topology.find("VGA1").expect("VGA1 should be reported");

    assert_eq!(vga.available_actions()?, vec![Action::Activate]);

    Ok(())
}

#[test]
fn test_last_active_output_guard() -> Result<(), Box<dyn std::error::Error>> {
    let topology = Topology::from_status(ONE_ACTIVE)?;
    let hdmi = topology.find("HDMI1").expect("HDMI1 should be reported");

    assert!(
        matches!(
            hdmi.ensure_can_deactivate(),
            Err(TopologyError::LastActiveOutput(name)) if name == "HDMI1"
        ),
        "The only active output must not be deactivated"
    );

    let topology = Topology::from_status(TWO_ACTIVE)?;
    let hdmi = topology.find("HDMI1").expect("HDMI1 should be reported");
    hdmi.ensure_can_deactivate()?;

    Ok(())
}

#[test]
fn test_connected_outputs_partition() -> Result<(), Box<dyn std::error::Error>> {
    let topology = Topology::from_status(TWO_ACTIVE)?;

    for output in topology.connected_outputs() {
        let in_active = topology
            .active_outputs()
            .any(|active| active.index() == output.index());
        assert_eq!(
            in_active,
            output.is_active(),
            "Output {} must be in exactly one of the views",
            output.name()
        );
    }

    assert_eq!(topology.connected_outputs().count(), 2);
    assert_eq!(topology.active_outputs().count(), 2);

    Ok(())
}

#[test]
fn test_views_keep_discovery_order() -> Result<(), Box<dyn std::error::Error>> {
    let topology = Topology::from_status(TWO_ACTIVE)?;

    let names: Vec<String> = topology
        .active_outputs()
        .map(|output| output.name().to_string())
        .collect();
    assert_eq!(names, vec!["HDMI1", "DP1"]);

    Ok(())
}

#[test]
fn test_action_labels() -> Result<(), Box<dyn std::error::Error>> {
    let topology = Topology::from_status(ONE_ACTIVE)?;
    let hdmi = topology.find("HDMI1").expect("HDMI1 should be reported");

    assert_eq!(hdmi.describe_action(Action::Activate), "Activate HDMI1");
    assert_eq!(hdmi.describe_action(Action::Deactivate), "Deactivate HDMI1");
    assert_eq!(
        hdmi.describe_action(Action::ChangeResolution),
        "Change resolution of HDMI1 (1920x1080)"
    );

    Ok(())
}

#[test]
fn test_get_by_index() -> Result<(), Box<dyn std::error::Error>> {
    let topology = Topology::from_status(ONE_ACTIVE)?;

    let first = topology.get(0).expect("Index 0 should exist");
    assert_eq!(first.name(), "HDMI1");
    assert!(topology.get(2).is_none());

    Ok(())
}
