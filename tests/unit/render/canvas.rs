use super::*;

const HEADER: &str = "#N canvas 0 50 1000 600 10;\n";

#[test]
fn empty_patch_is_just_the_header() {
    assert_eq!(render(&Patch::new()), HEADER);
}

#[test]
fn single_object_line() {
    let mut p = Patch::new();
    p.obj("loadbang").add().unwrap();
    assert_eq!(render(&p), format!("{HEADER}#X obj 25 25 loadbang;\n"));
}

#[test]
fn nodes_then_connections() {
    let mut p = Patch::new();
    let a = p.obj("loadbang").add().unwrap();
    let t = p
        .obj("t b b")
        .inlet(a.outlet(0))
        .inlet(a.outlet(1))
        .add()
        .unwrap();
    p.msg("0, 1 $2").inlet(t.outlet(1)).same_row().add().unwrap();

    let expected = [
        "#N canvas 0 50 1000 600 10;",
        "#X obj 25 25 loadbang;",
        "#X obj 25 50 t b b;",
        "#X msg 75 50 0 \\,  1 \\$2;",
        "#X connect 0 0 1 0;",
        "#X connect 0 1 1 1;",
        "#X connect 1 1 2 0;",
        "",
    ]
    .join("\n");
    assert_eq!(render(&p), expected);
}

#[test]
fn floatatom_and_array_templates() {
    let mut p = Patch::new();
    p.floatatom().limits(-1.0, 1.5).label("gain").add().unwrap();
    p.create_array("wave", 512);
    let out = render(&p);
    assert!(out.contains("#X floatatom 25 25 5 1.5 -1 gain - -;\n"));
    assert!(out.contains("#X array wave 512 float 0;\n"));
}

#[test]
fn subpatch_renders_nested_block() {
    let mut inner = Patch::new();
    inner.obj("inlet").add().unwrap();

    let mut p = Patch::new();
    p.subpatch("envelope", inner).add().unwrap();

    let expected = [
        "#N canvas 0 50 1000 600 10;",
        "#N canvas 0 0 300 180 (subpatch) 0;",
        "#X obj 25 25 inlet;",
        "#X restore 25 25 pd envelope;",
        "",
    ]
    .join("\n");
    assert_eq!(render(&p), expected);
}

#[test]
fn nested_connections_stay_inside_their_block() {
    let mut inner = Patch::new();
    let i = inner.obj("inlet").add().unwrap();
    inner.obj("outlet").inlet(i.outlet(0)).add().unwrap();

    let mut p = Patch::new();
    let src = p.obj("bang").add().unwrap();
    p.subpatch("pass", inner).inlet(src.outlet(0)).add().unwrap();

    let out = render(&p);
    let restore = out.find("#X restore").unwrap();
    let inner_conn = out.find("#X connect 0 0 1 0;").unwrap();
    assert!(inner_conn < restore);
    assert!(out.ends_with("#X restore 25 50 pd pass;\n#X connect 0 0 1 0;\n"));
}

#[test]
fn rendering_is_repeatable() {
    let mut p = Patch::new();
    let a = p.obj("metro 250").add().unwrap();
    p.obj("print tick").inlet(a.outlet(0)).add().unwrap();
    assert_eq!(render(&p), render(&p));
    assert_eq!(p.to_string(), render(&p));
}

#[test]
fn custom_headers() {
    let opts = RenderOpts {
        font_size: 12,
        subpatch_open: true,
        ..RenderOpts::default()
    };
    let mut p = Patch::new();
    p.subpatch("x", Patch::new()).add().unwrap();
    let out = render_with(&p, &opts);
    assert!(out.starts_with("#N canvas 0 50 1000 600 12;\n#N canvas 0 0 300 180 (subpatch) 1;\n"));
}

#[test]
fn write_file_creates_parent_dirs() {
    let dir = std::path::PathBuf::from("target").join("unit_write_file");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("nested").join("out.pd");
    write_file(&path, HEADER).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), HEADER);
}

#[test]
fn symbol_fields_stay_single_atoms() {
    let mut p = Patch::new();
    p.floatatom().label("").send("out put").add().unwrap();
    p.subpatch("my synth", Patch::new()).add().unwrap();
    p.create_array("t;1", 4);

    let expected = [
        "#N canvas 0 50 1000 600 10;",
        "#X floatatom 25 25 5 0 0 - - out\\ put;",
        "#N canvas 0 0 300 180 (subpatch) 0;",
        "#X restore 25 50 pd my\\ synth;",
        "#X array t\\;1 4 float 0;",
        "",
    ]
    .join("\n");
    assert_eq!(render(&p), expected);
}
