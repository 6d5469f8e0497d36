//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use typemark::markup::{HighlightClasses, Highlighter};
use typemark::profile::Profile;
use typemark::Classifier;

/// A prettify-rendered snippet from the libpmemobj manual
pub const PMEMOBJ_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>libpmemobj: Transactions</title></head>
<body>
<div class="contents">
<p>The pool handle is a <code>PMEMobjpool</code> pointer; typed handles use <code>TOID</code>.</p>
<pre class="prettyprint"><span class="pln">POBJ_LAYOUT_BEGIN</span><span class="pun">(</span><span class="pln">list</span><span class="pun">);</span>
<span class="kwd">struct</span><span class="pln"> </span><span class="pln">my_root</span><span class="pln"> </span><span class="pun">{</span>
<span class="pln">    </span><span class="pln">TOID</span><span class="pun">(</span><span class="kwd">struct</span><span class="pln"> node</span><span class="pun">)</span><span class="pln"> head</span><span class="pun">;</span>
<span class="pln">    </span><span class="pln">PMEMmutex</span><span class="pln"> </span><span class="pln">lock</span><span class="pun">;</span>
<span class="pun">};</span>
<span class="pln">PMEMobjpool</span><span class="pln"> </span><span class="pun">*</span><span class="pln">pop</span><span class="pun">;</span>
<span class="pln">TOID</span><span class="pln"> </span><span class="pln">root</span><span class="pun">;</span>
</pre>
</div>
</body>
</html>
"#;

pub fn builtin_classifier(id: &str) -> Classifier {
    Classifier::new(Profile::from_builtin(id).unwrap().names)
}

pub fn pmemobj_highlighter() -> Highlighter {
    Highlighter::new(
        builtin_classifier("libpmemobj"),
        HighlightClasses::default(),
    )
    .unwrap()
}
