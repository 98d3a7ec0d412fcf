//! Integration tests for the AgX config generator crates.
//!
//! End-to-end checks that the working spaces, the formation curve and the
//! written config agree with each other.

static NULL: serde_yaml::Value = serde_yaml::Value::Null;

/// Strips a YAML tag if the parser kept it.
pub fn untag(value: &serde_yaml::Value) -> &serde_yaml::Value {
    match value {
        serde_yaml::Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

/// Looks up `key` in a (possibly tagged) mapping.
pub fn field<'a>(value: &'a serde_yaml::Value, key: &str) -> &'a serde_yaml::Value {
    untag(value)
        .get(key)
        .map(untag)
        .unwrap_or(&NULL)
}

#[cfg(test)]
mod tests {
    use super::{field, untag};
    use agx_curve::log2::open_domain_to_normalized_log2;
    use agx_curve::{FormationCurve, Sigmoid};
    use agx_math::Vec3;
    use agx_ocio::formation::{build_config, FormationSettings, LUT_FILE};
    use agx_ocio::{validate, IssueCategory};
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use serde_yaml::Value;
    use tempfile::tempdir;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).expect("config is valid YAML")
    }

    fn colorspace<'a>(doc: &'a Value, name: &str) -> &'a Value {
        field(doc, "colorspaces")
            .as_sequence()
            .expect("colorspaces list")
            .iter()
            .find(|cs| field(cs, "name").as_str() == Some(name))
            .unwrap_or_else(|| panic!("colorspace {name} missing"))
    }

    fn numbers(value: &Value) -> Vec<f64> {
        untag(value)
            .as_sequence()
            .expect("number list")
            .iter()
            .map(|v| v.as_f64().expect("number"))
            .collect()
    }

    /// Middle grey through the whole AgX Base chain, emulated channel-wise.
    #[test]
    fn test_middle_grey_through_chain() {
        let settings = FormationSettings::default();
        let pair = settings.working_spaces().unwrap();
        let curve = settings.curve();

        let working = pair.inset_matrix().unwrap() * Vec3::splat(0.18);
        let formed = Vec3::new(
            curve.apply(working.x).unwrap(),
            curve.apply(working.y).unwrap(),
            curve.apply(working.z).unwrap(),
        );
        let linear = Vec3::new(formed.x.powf(2.2), formed.y.powf(2.2), formed.z.powf(2.2));
        let destination = pair
            .outset_matrix()
            .unwrap()
            .try_inverse("outset matrix")
            .unwrap()
            * linear;

        for c in [destination.x, destination.y, destination.z] {
            assert_abs_diff_eq!(c, 0.18, epsilon = 1e-9);
            assert_abs_diff_eq!(c.powf(1.0 / 2.2), 0.18f64.powf(1.0 / 2.2), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_lut_matches_curve() {
        let curve = FormationCurve::default();
        let sample = curve.sample().unwrap();
        let lut = sample.to_lut().unwrap();
        let sigmoid = Sigmoid::new(curve.sigmoid).unwrap();

        assert_eq!(lut.size(), 4096);
        for x in [0.0, 0.1, curve.grey_position(), 0.9, 1.0] {
            assert_abs_diff_eq!(lut.apply(x), sigmoid.eval(x), epsilon = 1e-6);
        }

        let od = 0.18 * 2f64.powi(3);
        let encoded = open_domain_to_normalized_log2(od, curve.grey, curve.min_ev, curve.max_ev);
        assert_abs_diff_eq!(
            curve.apply(od).unwrap(),
            lut.apply(encoded),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_yaml_structure() {
        let config = build_config(&FormationSettings::default()).unwrap();
        let doc = parse(&config.to_yaml().unwrap());

        assert_eq!(field(&doc, "ocio_profile_version").as_u64(), Some(2));
        assert_eq!(field(&doc, "search_path").as_str(), Some("LUTs"));
        assert_eq!(field(&doc, "strictparsing").as_bool(), Some(true));
        assert_eq!(
            field(&doc, "description").as_str(),
            Some("A dangerous picture formation chain designed for Eduardo Suazo and Chris Brejon.")
        );

        let roles = field(&doc, "roles");
        assert_eq!(field(roles, "reference").as_str(), Some("Linear BT.709"));
        assert_eq!(field(roles, "data").as_str(), Some("Generic Data"));
        assert_eq!(field(roles, "default_byte").as_str(), Some("sRGB"));

        let views = field(field(&doc, "displays"), "BT.1886")
            .as_sequence()
            .expect("views");
        let names: Vec<_> = views.iter().map(|v| field(v, "name").as_str()).collect();
        assert_eq!(names, [Some("Display Native"), Some("AgX")]);
        assert_eq!(field(&views[1], "colorspace").as_str(), Some("AgX Base BT.1886"));

        assert_eq!(field(&doc, "colorspaces").as_sequence().map(Vec::len), Some(11));
    }

    #[test]
    fn test_yaml_log_encoding_values() {
        let settings = FormationSettings::default();
        let config = build_config(&settings).unwrap();
        let doc = parse(&config.to_yaml().unwrap());

        let log = colorspace(&doc, "AgX Log (SB2383)");
        assert_eq!(field(log, "description").as_str(), Some("AgX Log, (SB2383)"));
        assert_eq!(field(log, "encoding").as_str(), Some("log"));
        let aliases = field(log, "aliases").as_sequence().expect("aliases");
        assert_eq!(aliases.len(), 4);

        let children = field(field(log, "from_scene_reference"), "children")
            .as_sequence()
            .expect("group children");
        assert_eq!(children.len(), 3);

        let written = numbers(field(&children[1], "matrix"));
        let expected = settings
            .working_spaces()
            .unwrap()
            .inset_matrix()
            .unwrap()
            .to_ocio_4x4();
        assert_eq!(written, expected);

        assert_eq!(field(&children[2], "allocation").as_str(), Some("lg2"));
        let vars = numbers(field(&children[2], "vars"));
        assert_eq!(vars, settings.curve().allocation_vars());
    }

    #[test]
    fn test_yaml_base_chain() {
        let config = build_config(&FormationSettings::default()).unwrap();
        let doc = parse(&config.to_yaml().unwrap());

        let base = colorspace(&doc, "AgX Base");
        let children = field(field(base, "from_scene_reference"), "children")
            .as_sequence()
            .expect("group children");
        assert_eq!(field(&children[0], "dst").as_str(), Some("AgX Log (SB2383)"));
        assert_eq!(field(&children[1], "src").as_str(), Some(LUT_FILE));
        assert_eq!(numbers(field(&children[2], "value")), [2.2, 2.2, 2.2, 1.0]);
        assert!(field(&children[2], "direction").is_null());
        assert_eq!(field(&children[3], "direction").as_str(), Some("inverse"));
        assert_eq!(field(&children[4], "direction").as_str(), Some("inverse"));

        let bt1886 = colorspace(&doc, "BT.1886");
        let transform = field(bt1886, "from_scene_reference");
        assert_eq!(field(transform, "dst").as_str(), Some("2.4 EOTF Encoding"));

        let data = colorspace(&doc, "Generic Data");
        assert_eq!(field(data, "isdata").as_bool(), Some(true));
        assert!(field(data, "from_scene_reference").is_null());
    }

    #[test]
    fn test_written_config_validates() {
        let dir = tempdir().unwrap();
        let config = build_config(&FormationSettings::default()).unwrap();
        let path = dir.path().join("config.ocio");
        config.write(&path).unwrap();

        assert!(!validate::has_errors(&validate::check(&config)));

        let missing = validate::check_files(&config, dir.path());
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].category, IssueCategory::MissingFile);
        assert_eq!(missing[0].context.as_deref(), Some(LUT_FILE));

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(parse(&text), parse(&config.to_yaml().unwrap()));
    }

    #[test]
    fn test_random_settings_produce_valid_configs() {
        let mut rng = ChaCha8Rng::seed_from_u64(2383);
        for _ in 0..32 {
            let settings = FormationSettings {
                primaries_rotate: [
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                ],
                primaries_inset: [
                    rng.gen_range(0.0..0.3),
                    rng.gen_range(0.0..0.3),
                    rng.gen_range(0.0..0.3),
                ],
                tinting_rotate: rng.gen_range(-180.0..180.0),
                tinting_outset: rng.gen_range(0.0..0.1),
                fulcrum_slope: rng.gen_range(1.5..3.0),
                exponent_toe: rng.gen_range(1.0..3.0),
                exponent_shoulder: rng.gen_range(1.0..3.0),
                samples: 256,
                ..Default::default()
            };

            let config = build_config(&settings).unwrap();
            assert!(!validate::has_errors(&validate::check(&config)));
            parse(&config.to_yaml().unwrap());

            let sample = settings.curve().sample().unwrap();
            assert!(sample.ys().windows(2).all(|w| w[1] >= w[0]));
        }
    }
}
