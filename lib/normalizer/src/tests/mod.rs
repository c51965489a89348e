mod interfaces;
mod testkit;

use crate::tests::testkit::{normalize_and_print, read_fixture};

#[test]
fn kitchen_sink_operation() -> Result<(), Box<dyn std::error::Error>> {
    let source = read_fixture("fixture/operations/kitchen-sink.graphql");

    insta::assert_snapshot!(
        normalize_and_print(&source)?,
        @r#"query KitchenSink($id:Int=4$term:String$skipPhotos:Boolean!)@trace{user(id:$id){name id handle birthday friends{name handle id}}profile(id:4){handle ...on User{name}...on Page{likers{id handle name}}}search(term:$term){__typename ...on Photo@skip(if:$skipPhotos){url}...on User{__typename id}}kitchenSink(ints:[1 -2 3]text:"block\n  string \"\"\"" input:{a:1 b:"x\ty" list:[1.5e3]})}"#
    );

    Ok(())
}
