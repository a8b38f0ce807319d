use std::io::Write;

use super::*;

const KUBECONFIG: &str = r#"apiVersion: v1
kind: Config
preferences: {}
current-context: dev
clusters:
- name: dev-cluster
  cluster:
    server: https://127.0.0.1:6443
    certificate-authority-data: Zm9v
- name: prod-cluster
  cluster:
    server: https://10.0.0.1:6443
contexts:
- name: dev
  context:
    cluster: dev-cluster
    user: dev-admin
    namespace: default
- name: prod
  context:
    cluster: prod-cluster
    user: prod-admin
    namespace: monitoring
- name: bare
users:
- name: dev-admin
  user:
    token: secret-token
- name: prod-admin
  user:
    exec:
      command: aws
      args: ["eks", "get-token"]
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn read_doc(path: &Path) -> Value {
    serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn load_reads_active_context_and_entries() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();
    let config = store.config();

    assert_eq!(config.active_context(), "dev");
    let names: Vec<&str> = config.contexts().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["dev", "prod", "bare"]);
    assert_eq!(config.find("prod").unwrap().active_namespace(), "monitoring");
}

#[test]
fn context_without_attributes_has_empty_namespace() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();
    assert_eq!(store.config().find("bare").unwrap().active_namespace(), "");
}

#[test]
fn load_empty_file_fails() {
    let file = write_config("");
    let err = ConfigStore::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyFile { .. }));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigStore::load(dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn load_malformed_yaml_is_parse_error() {
    let file = write_config("contexts: [unterminated\n");
    let err = ConfigStore::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn load_wrong_shape_is_parse_error() {
    let file = write_config("contexts: 42\n");
    let err = ConfigStore::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn context_exists_matches_loaded_names_only() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();
    assert!(store.context_exists("dev"));
    assert!(store.context_exists("prod"));
    assert!(!store.context_exists("staging"));
    assert!(!store.context_exists(""));
    assert!(!store.context_exists("Dev"));
}

#[test]
fn switch_to_updates_current_context_and_namespace() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();

    store.switch_to(&SelectionTarget::new("prod", "kube-system")).unwrap();

    let reloaded = ConfigStore::load(file.path()).unwrap();
    assert_eq!(reloaded.config().active_context(), "prod");
    assert_eq!(reloaded.config().find("prod").unwrap().active_namespace(), "kube-system");
    assert_eq!(reloaded.config().find("dev").unwrap().active_namespace(), "default");
}

#[test]
fn switch_to_preserves_untouched_fields() {
    let file = write_config(KUBECONFIG);
    let before = read_doc(file.path());
    let store = ConfigStore::load(file.path()).unwrap();

    store.switch_to(&SelectionTarget::new("prod", "kube-system")).unwrap();

    let after = read_doc(file.path());
    for key in ["apiVersion", "kind", "preferences", "clusters", "users"] {
        assert_eq!(before.get(key), after.get(key), "field {key} changed");
    }
    assert_eq!(before["contexts"][0], after["contexts"][0]);
    assert_eq!(before["contexts"][2], after["contexts"][2]);
    assert_eq!(after["contexts"][1]["context"]["cluster"], Value::from("prod-cluster"));
    assert_eq!(after["contexts"][1]["context"]["user"], Value::from("prod-admin"));
}

#[test]
fn switch_to_keeps_key_order() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();
    store.switch_to(&SelectionTarget::new("prod", "kube-system")).unwrap();

    let after = read_doc(file.path());
    let keys: Vec<&str> = after.as_mapping().unwrap().keys().filter_map(Value::as_str).collect();
    assert_eq!(keys, vec!["apiVersion", "kind", "preferences", "current-context", "clusters", "contexts", "users"]);
}

#[test]
fn switch_to_creates_missing_context_mapping() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();

    store.switch_to(&SelectionTarget::new("bare", "apps")).unwrap();

    let reloaded = ConfigStore::load(file.path()).unwrap();
    assert_eq!(reloaded.config().active_context(), "bare");
    assert_eq!(reloaded.config().find("bare").unwrap().active_namespace(), "apps");
}

#[test]
fn switch_to_unknown_context_fails_and_leaves_file() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();

    let err = store.switch_to(&SelectionTarget::new("staging", "default")).unwrap_err();

    assert!(matches!(err, ConfigError::ContextNotFound(ref name) if name == "staging"));
    assert_eq!(fs::read_to_string(file.path()).unwrap(), KUBECONFIG);
}

#[test]
fn switch_to_rereads_file_written_after_load() {
    let file = write_config(KUBECONFIG);
    let store = ConfigStore::load(file.path()).unwrap();

    let edited = KUBECONFIG.replace("- name: bare\n", "- name: bare\n- name: added-later\n");
    fs::write(file.path(), edited).unwrap();

    store.switch_to(&SelectionTarget::new("dev", "apps")).unwrap();

    let reloaded = ConfigStore::load(file.path()).unwrap();
    assert!(reloaded.context_exists("added-later"));
    assert_eq!(reloaded.config().find("dev").unwrap().active_namespace(), "apps");
}

#[test]
fn switch_to_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    fs::write(&path, KUBECONFIG).unwrap();
    let store = ConfigStore::load(&path).unwrap();

    store.switch_to(&SelectionTarget::new("prod", "default")).unwrap();

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("config")]);
}

#[test]
fn concurrent_switches_do_not_share_a_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    fs::write(&path, KUBECONFIG).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let path = path.clone();
            std::thread::spawn(move || {
                let store = ConfigStore::load(&path).unwrap();
                let ns = format!("ns-{i}");
                for _ in 0..10 {
                    store.switch_to(&SelectionTarget::new("prod", ns.as_str())).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let reloaded = ConfigStore::load(&path).unwrap();
    assert_eq!(reloaded.config().active_context(), "prod");
    assert!(reloaded.config().find("prod").unwrap().active_namespace().starts_with("ns-"));
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("config")]);
}

#[cfg(unix)]
#[test]
fn switch_to_keeps_file_mode() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config");
    fs::write(&path, KUBECONFIG).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

    ConfigStore::load(&path).unwrap().switch_to(&SelectionTarget::new("prod", "default")).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o600);
}

#[cfg(unix)]
#[test]
fn switch_to_follows_symlink() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real-config");
    let link = dir.path().join("config");
    fs::write(&real, KUBECONFIG).unwrap();
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let store = ConfigStore::load(&link).unwrap();
    store.switch_to(&SelectionTarget::new("prod", "default")).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    let reloaded = ConfigStore::load(&real).unwrap();
    assert_eq!(reloaded.config().active_context(), "prod");
}

#[test]
fn resolve_path_prefers_explicit_override() {
    let path = ConfigStore::resolve_path(Some(Path::new("/tmp/explicit"))).unwrap();
    assert_eq!(path, PathBuf::from("/tmp/explicit"));
}

#[test]
fn selection_target_displays_as_pair() {
    assert_eq!(SelectionTarget::new("prod", "monitoring").to_string(), "prod/monitoring");
}
