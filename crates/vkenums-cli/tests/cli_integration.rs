use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

const SAMPLE_REGISTRY: &str = r#"
<registry>
    <tags>
        <tag name="KHR" author="Khronos"/>
        <tag name="EXT" author="Multivendor"/>
    </tags>
    <enums name="VkResult" type="enum">
        <enum name="VK_SUCCESS" value="0" comment="Command completed successfully"/>
        <enum name="VK_ERROR_UNKNOWN" value="1" dir="-"/>
    </enums>
    <enums name="VkSampleCountFlagBits" type="bitmask">
        <enum name="VK_SAMPLE_COUNT_1_BIT" bitpos="0"/>
        <enum name="VK_SAMPLE_COUNT_2_BIT" bitpos="1"/>
    </enums>
    <feature api="vulkan" name="VK_VERSION_1_0" number="1.0">
        <require>
            <type name="VkResult"/>
            <type name="VkSampleCountFlagBits"/>
        </require>
    </feature>
    <extensions>
        <extension name="VK_KHR_surface" number="1">
            <require>
                <enum extends="VkResult" offset="0" dir="-" name="VK_ERROR_SURFACE_LOST_KHR"/>
            </require>
        </extension>
        <extension name="VK_KHR_swapchain" number="2" requires="VK_KHR_surface">
            <require>
                <enum extends="VkResult" offset="1" dir="-" name="VK_ERROR_OUT_OF_DATE_KHR"/>
            </require>
        </extension>
    </extensions>
</registry>
"#;

fn write_registry(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("vk.xml");
    fs::write(&path, SAMPLE_REGISTRY).expect("write sample registry");
    path
}

fn vkenums() -> Command {
    let mut cmd = Command::cargo_bin("vkenums").expect("binary built");
    // Keep runs hermetic: never pick up a developer's vkenums.toml.
    cmd.current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn generates_a_header_file() {
    let dir = tempfile::tempdir().unwrap();
    let xml = write_registry(&dir);
    let out = dir.path().join("VulkanEnums.hpp");

    vkenums()
        .args([
            "--no-color",
            "generate",
            "--xml",
            xml.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--namespace",
            "vk",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("declarations written to"));

    let header = fs::read_to_string(&out).unwrap();
    assert!(header.contains("namespace vk {"));
    assert!(header.contains("enum class Result : uint32_t {"));
    assert!(header.contains("SUCCESS = 0,"));
    assert!(header.contains("ERROR_UNKNOWN = -1U"));
    // Extension values use the offset encoding; surface is extension 1.
    assert!(header.contains("ERROR_SURFACE_LOST_KHR = -1000000000U"));
    // Bitmask group with operators and shift rendering.
    assert!(header.contains("enum class SampleCountFlags : uint32_t {"));
    assert!(header.contains("SAMPLE_COUNT_1_BIT = 1ULL << 0"));
    assert!(header.contains("operator|"));
}

#[test]
fn friendly_name_flags_produce_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let xml = write_registry(&dir);
    let out = dir.path().join("VulkanEnums.hpp");

    vkenums()
        .args([
            "generate",
            "--xml",
            xml.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
            "--remove-structure-names",
            "--tolower",
            "--capitalize-start",
            "--remove-underscores",
            "--value-remove-postfix-core-types",
            "--value-number-prefix",
            "e",
        ])
        .assert()
        .success();

    let header = fs::read_to_string(&out).unwrap();
    assert!(header.contains("Success = 0,"));
    assert!(header.contains("ErrorUnknown = -1U"));
    assert!(header.contains("ErrorSurfaceLost = -1000000000U"));
    // Leading digit after structure-name stripping gets the prefix.
    assert!(header.contains("e1Bit = 1ULL << 0"));
}

#[test]
fn excluding_an_extension_excludes_its_dependents() {
    let dir = tempfile::tempdir().unwrap();
    let xml = write_registry(&dir);

    let assert = vkenums()
        .args([
            "generate",
            "--xml",
            xml.to_str().unwrap(),
            "--exclude",
            "VK_KHR_surface",
        ])
        .assert()
        .success();

    let header = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!header.contains("ERROR_SURFACE_LOST_KHR"));
    // swapchain requires surface, so its value disappears too.
    assert!(!header.contains("ERROR_OUT_OF_DATE_KHR"));
    assert!(header.contains("SUCCESS = 0"));
}

#[test]
fn json_format_emits_declaration_records() {
    let dir = tempfile::tempdir().unwrap();
    let xml = write_registry(&dir);

    vkenums()
        .args([
            "generate",
            "--xml",
            xml.to_str().unwrap(),
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "Result""#))
        .stdout(predicate::str::contains(r#""bit_position": true"#));
}

#[test]
fn include_and_exclude_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let xml = write_registry(&dir);

    vkenums()
        .args([
            "generate",
            "--xml",
            xml.to_str().unwrap(),
            "--include",
            "VK_KHR_swapchain",
            "--exclude",
            "VK_KHR_surface",
        ])
        .assert()
        .failure();
}

#[test]
fn schema_dump_writes_record_schemas() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("schemas");

    vkenums()
        .args(["schema", "--out-dir", out_dir.to_str().unwrap()])
        .assert()
        .success();

    for name in ["enum_decl.schema.json", "value_record.schema.json"] {
        let text = fs::read_to_string(out_dir.join(name)).unwrap();
        assert!(text.contains("\"title\""), "{name} should be a JSON schema");
    }
}

#[test]
fn missing_registry_file_fails() {
    vkenums()
        .args(["generate", "--xml", "/nonexistent/vk.xml"])
        .assert()
        .failure();
}
