// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Owning/borrowing handle lifecycles over the headless resource table.

use oriel_core::handle::{Handle, HandleRef, RawId, Renderer, Texture, Window};
use oriel_core::ResourceError;
use oriel_infra::resources;

fn setup() {
    let _ = env_logger::builder().is_test(true).try_init();
    oriel_infra::install();
}

#[test]
fn owning_handle_destroys_on_drop() {
    setup();
    let id = resources::acquire::<Window>();

    {
        let window = Handle::<Window>::claim(id).expect("fresh id is non-null");
        assert!(window.valid());
        assert!(resources::is_live(id));
    }

    assert!(!resources::is_live(id));
    assert_eq!(resources::stray_release_count(), 0);
}

#[test]
fn explicit_release_then_drop_destroys_once() {
    setup();
    let id = resources::acquire::<Renderer>();

    let mut renderer = Handle::<Renderer>::claim(id).unwrap();
    renderer.release();
    assert!(!renderer.valid());
    assert!(!resources::is_live(id));

    // Neither the repeated release nor the drop may reach the table again;
    // a second arrival would show up as a stray release.
    renderer.release();
    drop(renderer);
    assert_eq!(resources::stray_release_count(), 0);
}

#[test]
fn borrows_alias_without_destroying() {
    setup();
    let id = resources::acquire::<Texture>();
    let texture = Handle::<Texture>::claim(id).unwrap();

    let alias: HandleRef<Texture> = texture.borrow();
    let copy = alias;
    assert_eq!(copy.get(), id);
    drop(alias);
    drop(copy);
    assert!(resources::is_live(id));

    drop(texture);
    assert!(!resources::is_live(id));
}

#[test]
fn claiming_a_null_id_reports_the_kind() {
    setup();
    let err = Handle::<Window>::claim(RawId::NULL).unwrap_err();
    let ResourceError::InvalidResource { kind } = err;
    assert_eq!(kind, "window");
}

#[test]
fn into_raw_escapes_the_table_release() {
    setup();
    let id = resources::acquire::<Window>();
    let window = Handle::<Window>::claim(id).unwrap();

    let escaped = window.into_raw();
    assert_eq!(escaped, id);
    assert!(resources::is_live(id));

    // The caller is now the owner; hand it back to a fresh handle.
    let window = Handle::<Window>::claim(escaped).unwrap();
    drop(window);
    assert!(!resources::is_live(id));
}
