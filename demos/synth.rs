//! Builds a small synth voice (oscillator + ADSR envelope subpatch) and writes it as a
//! `.pd` file. Usage: `cargo run --example synth -- [out.pd]`.

use puredata_compiler::{Patch, PatchResult, render, write_file};

/// ADSR envelope driven by `volume attack decay sustain release` lists.
fn envelope() -> PatchResult<Patch> {
    let mut p = Patch::new();

    let inlet = p.obj("inlet").add()?;
    // 0:volume 1-4:ADSR[ms,ms,scalar,ms]
    let env_unpacker = p.obj("unpack 0 0 0 0 0").inlet(inlet.outlet(0)).add()?;

    let attack_if = p.obj("moses 1e-12").inlet(env_unpacker.outlet(0)).add()?;
    let nonzero_volume = p
        .obj("f")
        .inlet(attack_if.outlet(1))
        .new_row(2.0)
        .add()?;

    // volume > 0
    let attack_trig = p
        .obj("t b b")
        .inlet(nonzero_volume.outlet(0))
        .same_row()
        .add()?;
    let prerelease_params = p.msg("1").inlet(attack_trig.outlet(1)).same_row().add()?;
    let sustain_sqrt = p
        .obj("expr sqrt($f2)")
        .inlet(attack_trig.outlet(0))
        .inlet(env_unpacker.outlet(3))
        .add()?;
    let attack_prep = p
        .obj("pack 0 0 0")
        .inlet(sustain_sqrt.outlet(0))
        .inlet(env_unpacker.outlet(1))
        .inlet(env_unpacker.outlet(2))
        .add()?;
    let attack_params = p
        .msg("0, 1 $2, $1 $3 $2")
        .inlet(attack_prep.outlet(0))
        .add()?;
    let attack_env = p.obj("vline~").inlet(attack_params.outlet(0)).add()?;

    // volume == 0
    let release_trig = p.obj("t b").inlet(attack_if.outlet(0)).at(325, 125).add()?;
    let release = p
        .obj("f")
        .inlet(release_trig.outlet(0))
        .inlet(env_unpacker.outlet(4))
        .same_row()
        .add()?;
    let release_params = p.msg("0 $1").inlet(release.outlet(0)).add()?;
    let release_env = p
        .obj("vline~")
        .inlet([prerelease_params.outlet(0), release_params.outlet(0)])
        .add()?;

    let full_env = p
        .obj("*~")
        .inlet(attack_env.outlet(0))
        .inlet(release_env.outlet(0))
        .at(125, 250)
        .add()?;
    let full_env = p
        .obj("*~")
        .inlet(full_env.outlet(0))
        .inlet(nonzero_volume.outlet(0))
        .add()?;
    let full_env = p
        .obj("*~")
        .inlet(full_env.outlet(0))
        .inlet(full_env.outlet(0))
        .add()?;
    p.obj("outlet~").inlet(full_env.outlet(0)).add()?;

    Ok(p)
}

/// Voice triggered by `note` messages: frequency, volume and ADSR.
fn voice() -> PatchResult<Patch> {
    let mut p = Patch::new();

    let loadbang = p.obj("loadbang").add()?;
    p.msg("pd dsp 1").inlet(loadbang.outlet(0)).add()?;
    p.msg("1; note 440 0.8  80 0 1.0 320").new_row(2.0).add()?;
    p.msg("1; note 440 0.0  80 0 1.0 320").add()?;

    let inlet = p.obj("r note").at(425, 25).add()?;
    // 0:frequency 1:volume 2-5:ADSR[ms,ms,scalar,ms]
    let note_unpacker = p.obj("unpack 0 0  0 0 0 0").inlet(inlet.outlet(0)).add()?;
    let note_unpacker_trig = p.obj("t b f").inlet(note_unpacker.outlet(0)).add()?;

    let allow_freq_change_test = p
        .obj("f")
        .inlet(note_unpacker_trig.outlet(0))
        .inlet(note_unpacker.outlet(1))
        .add()?;
    let allow_freq_change_if = p
        .obj("moses 1e-12")
        .inlet(allow_freq_change_test.outlet(0))
        .add()?;
    let osc_params = p
        .obj("expr $f2")
        .inlet(allow_freq_change_if.outlet(1))
        .inlet(note_unpacker_trig.outlet(1))
        .add()?;
    let osc = p.obj("osc~").inlet(osc_params.outlet(0)).new_row(2.0).add()?;

    let mut envelope_params = p.obj("pack 0 0 0 0 0").at(550, 125);
    for i in 1..=5 {
        envelope_params = envelope_params.inlet(note_unpacker.outlet(i));
    }
    let envelope_params = envelope_params.add()?;
    let pd_envelope = p
        .subpatch("envelope", envelope()?)
        .inlet(envelope_params.outlet(0))
        .add()?;

    let output = p
        .obj("*~")
        .inlet(osc.outlet(0))
        .inlet(pd_envelope.outlet(0))
        .add()?;
    p.obj("dac~").inlet(output.outlet(0)).inlet(output.outlet(0)).add()?;

    Ok(p)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "target/demos/pd_example.pd".to_string());
    let patch = voice()?;
    write_file(&out, &render(&patch))?;
    println!("wrote {out}: {} nodes", patch.nodes().len());
    Ok(())
}
