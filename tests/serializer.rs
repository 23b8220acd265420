use pretty_assertions::assert_eq;

use simple_script::{
    estimate_text_size, serialize_batch, Justify, Rect, Script, SimpleCommand, TextWidget,
};

fn every_widget(id: Option<&str>) -> Vec<SimpleCommand> {
    let rect = Rect::new(0.0, 0.0, 100.0, 40.0);
    let widgets = vec![
        SimpleCommand::label(rect, "a"),
        SimpleCommand::paragraph(rect, "a"),
        SimpleCommand::button(rect, "a"),
        SimpleCommand::text_input(rect, "a"),
        SimpleCommand::text_area(rect, "a"),
        SimpleCommand::range(rect, 0.0, 10.0, 5.0),
        SimpleCommand::image(rect, "/tmp/a.png"),
        SimpleCommand::canvas(rect, "/tmp/a.raw", "/tmp/a.png"),
    ];
    match id {
        Some(id) => widgets.into_iter().map(|w| w.with_id(id)).collect(),
        None => widgets,
    }
}

fn header(line: &str) -> &str {
    let line = line.strip_prefix('[').unwrap_or(line);
    line.split(' ').next().unwrap_or_default()
}

#[test]
fn widget_headers_carry_type_and_optional_id() {
    for command in every_widget(Some("w1")) {
        let line = command.serialize();
        assert_eq!(header(&line), format!("{}:w1", command.type_name()));
    }
    for command in every_widget(None) {
        let line = command.serialize();
        assert_eq!(header(&line), command.type_name());
    }
}

#[test]
fn only_paragraph_and_textarea_are_bracketed() {
    for command in every_widget(Some("x")) {
        let line = command.serialize();
        let bracketed = line.starts_with('[') && line.ends_with(']');
        let expected = matches!(command.type_name(), "paragraph" | "textarea");
        assert_eq!(bracketed, expected, "unexpected framing for {line}");
    }

    let directives = [
        SimpleCommand::justify(Justify::Left),
        SimpleCommand::font_size(20.0),
        SimpleCommand::timeout(3.0),
        SimpleCommand::NoClear,
    ];
    for command in directives {
        assert!(!command.serialize().starts_with('['));
    }
}

#[test]
fn login_form_script() {
    let mut script = Script::new();
    script
        .push(SimpleCommand::justify(Justify::Left))
        .push(SimpleCommand::font_size(32.0))
        .push(SimpleCommand::timeout(60.0))
        .push(SimpleCommand::label(
            Rect::for_text(100.0, 100.0, 32.0, "Přihlášení"),
            "Přihlášení",
        ))
        .push(SimpleCommand::text_input(Rect::new(100.0, 200.0, 800.0, 50.0), "").with_id("user"))
        .push(SimpleCommand::button(Rect::new(100.0, 300.0, 200.0, 50.0), "Pokračovat").with_id("next"))
        .push(SimpleCommand::NoClear);

    let size = estimate_text_size(32.0, "Přihlášení");
    let expected = format!(
        "@justify left\n@fontsize 32\n@timeout 60\nlabel 100 100 {} {} Přihlášení.\ntextinput:user 100 200 800 50\nbutton:next 100 300 200 50 Pokračovat\n@noclear",
        size.width, size.height
    );
    assert_eq!(script.serialize(), expected);
    assert_eq!(script.len(), 7);
}

#[test]
fn multi_line_block_values_are_sent_raw_inside_brackets() {
    let paragraph = SimpleCommand::Paragraph(TextWidget {
        id: Some("body".to_string()),
        rect: Rect::new(0.0, 0.0, 500.0, 200.0),
        value: "first\nsecond".to_string(),
    });
    assert_eq!(
        paragraph.serialize(),
        "[paragraph:body 0 0 500 200 first\nsecond]"
    );

    let notes = SimpleCommand::text_area(Rect::new(0.0, 0.0, 500.0, 200.0), "ČERVENÁ\nmodrá")
        .with_id("notes");
    assert_eq!(
        notes.serialize(),
        "[textarea:notes 0 0 500 200 čERVENá\nmodrá.]"
    );
}

#[test]
fn out_of_canvas_rects_pass_through() {
    let command = SimpleCommand::label(Rect::new(2000.0, -40.0, 99999.0, 1.25), "far");
    assert_eq!(command.serialize(), "label 2000 -40 99999 1.25 far");
}

#[test]
fn batch_from_json_matches_hand_built_commands() {
    let json = r#"[
        {"type": "fontsize", "fontSize": 24},
        {"type": "button", "id": "ok", "x": 10, "y": 20, "width": 100, "height": 50, "value": "OK"},
        {"type": "range", "x": 0, "y": 0, "width": 300, "height": 40, "min": 0, "max": 10, "value": 3},
        {"type": "canvas", "id": "pad", "x": 0, "y": 100, "width": 1380, "height": 1000, "rawPath": "/tmp/p.raw", "pngPath": "/tmp/p.png"},
        {"type": "justify", "justify": "right"},
        {"type": "noclear"}
    ]"#;
    let script: Script = serde_json::from_str(json).expect("valid script json");

    assert_eq!(
        script.commands(),
        &[
            SimpleCommand::font_size(24.0),
            SimpleCommand::button(Rect::new(10.0, 20.0, 100.0, 50.0), "OK").with_id("ok"),
            SimpleCommand::range(Rect::new(0.0, 0.0, 300.0, 40.0), 0.0, 10.0, 3.0),
            SimpleCommand::canvas(
                Rect::new(0.0, 100.0, 1380.0, 1000.0),
                "/tmp/p.raw",
                "/tmp/p.png"
            )
            .with_id("pad"),
            SimpleCommand::justify(Justify::Right),
            SimpleCommand::NoClear,
        ]
    );
    assert_eq!(serialize_batch(script.commands()), script.serialize());
}
