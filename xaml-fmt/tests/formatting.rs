//! End-to-end formatting tests.
//!
//! Each test feeds a complete document through [`Formatter`] and checks the
//! rendered text and the usage report.

use std::fs;

use xaml_fmt::{Error, FormatOptions, Formatter};

const PRESENTATION: &str = "http://schemas.microsoft.com/winfx/2006/xaml/presentation";
const XAML: &str = "http://schemas.microsoft.com/winfx/2006/xaml";

/// Wraps body elements in a `Grid` root declaring the usual namespaces.
fn document(root_attributes: &str, body: &str) -> String {
    format!(
        r#"<Grid xmlns="{}" xmlns:x="{}" {}>{}</Grid>"#,
        PRESENTATION, XAML, root_attributes, body
    )
}

fn format(xml: &str) -> xaml_fmt::Formatted {
    Formatter::new().format_str(xml).unwrap()
}

const WINDOW: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<Window x:Class="App.MainWindow"
        xmlns="http://schemas.microsoft.com/winfx/2006/xaml/presentation"
        xmlns:x="http://schemas.microsoft.com/winfx/2006/xaml"
        xmlns:local="clr-namespace:App"
        Title="Main" Background="#FFFFFFFF">
    <Window.Resources>
        <Style TargetType="Button">
            <Setter Property="Foreground" Value="#FF000000" />
        </Style>
        <SolidColorBrush Key="Accent" Color="#00FFFFFF" />
    </Window.Resources>
    <Grid Name="LayoutRoot">
        <!-- content -->
        <TextBlock Text="{Binding ElementName=LayoutRoot, Path=Name}">Hello &amp; welcome</TextBlock>
    </Grid>
</Window>
"##;

const WINDOW_FORMATTED: &str = concat!(
    "<Window \n",
    "    x:Class=\"App.MainWindow\" \n",
    "    xmlns=\"http://schemas.microsoft.com/winfx/2006/xaml/presentation\" \n",
    "    xmlns:local=\"clr-namespace:App\" \n",
    "    xmlns:x=\"http://schemas.microsoft.com/winfx/2006/xaml\" \n",
    "    Background=\"White\" \n",
    "    Title=\"Main\">\n",
    "\n",
    "    <Window.Resources>\n",
    "\n",
    "        <Style TargetType=\"Button\">\n",
    "            <Setter Property=\"Foreground\" Value=\"Black\" />\n",
    "        </Style>\n",
    "        <SolidColorBrush \n",
    "            x:Key=\"Accent\" \n",
    "            Color=\"Transparent\" />\n",
    "    </Window.Resources>\n",
    "\n",
    "    <Grid x:Name=\"LayoutRoot\">\n",
    "        <!-- content -->\n",
    "        <TextBlock Text=\"{Binding ElementName=LayoutRoot, Path=Name}\">\n",
    "            Hello &amp; welcome\n",
    "        </TextBlock>\n",
    "    </Grid>\n",
    "\n",
    "</Window>\n",
);

#[test]
fn test_window_layout() {
    let formatted = format(WINDOW);
    assert_eq!(formatted.text, WINDOW_FORMATTED);
}

#[test]
fn test_window_usage_report() {
    let formatted = format(WINDOW);

    assert_eq!(formatted.registry.names(), ["LayoutRoot"]);
    assert_eq!(formatted.registry.keys(), ["Accent"]);
    assert_eq!(formatted.registry.namespaces(), ["x", "local"]);

    assert!(formatted.usage.unused_names.is_empty());
    assert_eq!(formatted.usage.unused_keys, ["Accent"]);
    assert_eq!(formatted.usage.unused_namespaces, ["local"]);
}

#[test]
fn test_formatting_is_idempotent() {
    let once = format(WINDOW);
    let twice = format(&once.text);
    assert_eq!(once.text, twice.text);
    assert_eq!(once.usage, twice.usage);
}

#[test]
fn test_identity_attributes_are_qualified() {
    let formatted = format(&document(
        "",
        r#"<Border Name="frame" /><SolidColorBrush Key="Brush" /><Button x:Name="ok" />"#,
    ));

    assert!(formatted.text.contains(r#"<Border x:Name="frame" />"#));
    assert!(formatted.text.contains(r#"<SolidColorBrush x:Key="Brush" />"#));
    assert!(formatted.text.contains(r#"<Button x:Name="ok" />"#));
    assert!(!formatted.text.contains(" Name="));
    assert!(!formatted.text.contains(" Key="));
}

#[test]
fn test_colour_substitution() {
    let formatted = format(&document(
        "",
        r##"<Border Background="#00FFFFFF" /><Border Background="#FF000000" /><Border Background="#FFFFFFFF" /><Border Background="#FF123456" />"##,
    ));

    for expected in [
        r#"Background="Transparent""#,
        r#"Background="Black""#,
        r#"Background="White""#,
        r##"Background="#FF123456""##,
    ] {
        assert!(formatted.text.contains(expected), "missing {}", expected);
    }
}

#[test]
fn test_one_line_boundary() {
    // A child of the root has a child indent of 8; Tag="..." adds 6 characters
    let at_limit = format(&document("", &format!(r#"<Border Tag="{}" />"#, "a".repeat(186))));
    assert!(at_limit
        .text
        .contains(&format!("    <Border Tag=\"{}\" />\n", "a".repeat(186))));

    let over_limit = format(&document("", &format!(r#"<Border Tag="{}" />"#, "a".repeat(187))));
    assert!(over_limit
        .text
        .contains(&format!("    <Border \n        Tag=\"{}\" />\n", "a".repeat(187))));
}

#[test]
fn test_unused_name_detection() {
    let lonely = format(&document("", r#"<Button Name="Foo" />"#));
    assert_eq!(lonely.usage.unused_names, ["Foo"]);

    let referenced = format(&document(
        "",
        r#"<Button Name="Foo" /><TextBlock Text="{Binding ElementName=Foo}" />"#,
    ));
    assert!(referenced.usage.unused_names.is_empty());
}

#[test]
fn test_unused_key_detection() {
    let formatted = format(&document(
        "",
        r#"<Grid.Resources><SolidColorBrush Key="Used" /><SolidColorBrush Key="Unused" /></Grid.Resources><Border Background="{StaticResource Used}" />"#,
    ));
    assert_eq!(formatted.usage.unused_keys, ["Unused"]);
}

#[test]
fn test_unused_namespace_detection() {
    let unused = format(&document(r#"xmlns:local="clr-namespace:App""#, ""));
    assert!(unused.usage.unused_namespaces.contains(&"local".to_string()));

    let used = format(&document(
        r#"xmlns:local="clr-namespace:App""#,
        "<local:Gauge />",
    ));
    assert!(!used.usage.unused_namespaces.contains(&"local".to_string()));
}

#[test]
fn test_second_element_gets_blank_line() {
    let formatted = format(&document("", "<Button><TextBlock /></Button>"));
    // The Button is the second element visited; its child TextBlock is not
    assert!(formatted.text.contains(">\n\n    <Button>\n        <TextBlock />\n"));
}

#[test]
fn test_style_always_gets_blank_line() {
    let formatted = format(&document(
        "",
        r#"<Grid.Resources><Border /><Style TargetType="Button" /></Grid.Resources>"#,
    ));
    assert!(formatted
        .text
        .contains("        <Border />\n\n        <Style TargetType=\"Button\" />\n"));
}

#[test]
fn test_merged_dictionaries_get_blank_line_after() {
    let formatted = format(
        r#"<ResourceDictionary xmlns="urn:p"><Border><ResourceDictionary.MergedDictionaries><ResourceDictionary Source="a.xaml" /></ResourceDictionary.MergedDictionaries><Border /></Border></ResourceDictionary>"#,
    );
    assert!(formatted
        .text
        .contains("        </ResourceDictionary.MergedDictionaries>\n\n        <Border />\n"));
}

#[test]
fn test_key_binding_exclusion() {
    let xml = document("", r#"<Grid.InputBindings><KeyBinding Key="F5" Command="Refresh" /></Grid.InputBindings>"#);

    let default = format(&xml);
    assert!(default.text.contains(r#"x:Key="F5""#));

    let options = FormatOptions {
        key_rewrite_exclusions: vec!["KeyBinding".to_string()],
        ..FormatOptions::default()
    };
    let excluded = Formatter::with_options(options).format_str(&xml).unwrap();
    assert!(excluded.text.contains(r#"Key="F5""#));
    assert!(!excluded.text.contains("x:Key"));
    assert!(excluded.registry.keys().is_empty());
}

#[test]
fn test_malformed_input_is_not_a_defect() {
    let err = Formatter::new().format_str("<Grid><Button></Grid>").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_format_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("MainWindow.xaml");
    fs::write(&path, WINDOW).unwrap();

    let formatted = Formatter::new().format_file(&path, &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), WINDOW_FORMATTED);
    assert_eq!(formatted.text, WINDOW_FORMATTED);
}

#[test]
fn test_format_file_to_other_destination() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.xaml");
    let destination = dir.path().join("out.xaml");
    fs::write(&source, WINDOW).unwrap();

    Formatter::new().format_file(&source, &destination).unwrap();

    assert_eq!(fs::read_to_string(&source).unwrap(), WINDOW);
    assert_eq!(fs::read_to_string(&destination).unwrap(), WINDOW_FORMATTED);
}

#[test]
fn test_format_file_leaves_destination_untouched_on_defect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Page.xaml");
    let original = r#"<Grid Name="root"><Button/></Grid>"#;
    fs::write(&path, original).unwrap();

    let err = Formatter::new().format_file(&path, &path).unwrap_err();

    assert!(err.is_internal_defect());
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn test_format_file_does_not_create_destination_on_defect() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("in.xaml");
    let destination = dir.path().join("out.xaml");
    fs::write(&source, r#"<Grid Name="root" />"#).unwrap();

    let err = Formatter::new().format_file(&source, &destination).unwrap_err();

    assert!(err.is_internal_defect());
    assert!(!destination.exists());
}

#[test]
fn test_non_breaking_space_content_is_kept() {
    let formatted = format(&document("", "<TextBlock>&#160;</TextBlock>"));
    assert!(formatted.text.contains("    <TextBlock>\n        \u{a0}\n    </TextBlock>\n"));

    let twice = format(&formatted.text);
    assert_eq!(formatted.text, twice.text);
}

#[test]
fn test_carriage_return_reference_round_trips() {
    let formatted = format(&document("", "<TextBlock>x&#13;y</TextBlock>"));
    assert!(formatted.text.contains("        x&#xD;y\n"));

    let twice = format(&formatted.text);
    assert_eq!(formatted.text, twice.text);
}

#[test]
fn test_format_file_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let err = Formatter::new()
        .format_file(dir.path().join("nope.xaml"), dir.path().join("out.xaml"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
