//! Stylesheet and script embedded in every page.

/// Page stylesheet.
pub const STYLESHEET: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{background:#0d0d0f;color:#e6e6e6;font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;min-height:100vh}
a{color:inherit;text-decoration:none}
.site-header{position:sticky;top:0;z-index:100;background:rgba(13,13,15,.92);backdrop-filter:blur(8px);border-bottom:1px solid #2a2a2e;padding:1rem 2rem}
.title-row{display:flex;align-items:center;justify-content:space-between;margin-bottom:1rem}
.title{font-size:1.6rem;font-weight:700;color:#d4a84b}
.count{font-size:.85rem;color:#8a8a92}
.chips{display:flex;flex-wrap:wrap;gap:.35rem}
.chip{font-size:.8rem;padding:.2rem .65rem;border-radius:999px;border:1px solid #2a2a2e;color:#8a8a92}
.chip:hover{border-color:#d4a84b;color:#d4a84b}
.chip.active{background:rgba(212,168,75,.19);border-color:#d4a84b;color:#d4a84b}
main{padding:1.5rem 2rem 4rem}
.empty{text-align:center;color:#8a8a92;padding:4rem 0}
.grid{display:grid;grid-template-columns:repeat(2,1fr);gap:8px}
@media(min-width:600px){.grid{grid-template-columns:repeat(3,1fr)}}
@media(min-width:900px){.grid{grid-template-columns:repeat(4,1fr)}}
@media(min-width:1200px){.grid{grid-template-columns:repeat(5,1fr)}}
.tile{position:relative;display:block;aspect-ratio:1;overflow:hidden;border-radius:4px;background:#18181b;border:1px solid #2a2a2e;transition:all 150ms ease}
.tile:hover{border-color:#d4a84b;transform:scale(1.02);z-index:1}
.tile img{position:absolute;inset:0;width:100%;height:100%;object-fit:cover}
.caption{position:absolute;left:0;right:0;bottom:0;padding:.25rem .5rem;font-size:.7rem;color:#fff;background:linear-gradient(transparent,rgba(0,0,0,.8))}
.highlights{display:grid;grid-template-columns:repeat(4,1fr);grid-auto-rows:180px;grid-auto-flow:dense;gap:8px}
.highlights .tile{aspect-ratio:auto}
.span-wide{grid-column:span 2}
.span-tall{grid-row:span 2}
.span-feature{grid-column:span 2;grid-row:span 2}
.year-list{margin-top:2rem;max-width:28rem}
.year-list h2{font-size:1rem;font-weight:600;color:#8a8a92;margin-bottom:.5rem}
.year-list li{list-style:none;border-bottom:1px solid #2a2a2e}
.year-list a{display:flex;justify-content:space-between;padding:.4rem 0}
.year-list a:hover{color:#d4a84b}
.browse-all{display:inline-block;margin-top:1rem;color:#d4a84b}
.sentinel{text-align:center;padding:2rem 0;color:#8a8a92}
.lightbox{position:fixed;inset:0;z-index:1000;background:rgba(0,0,0,.95);display:flex;align-items:center;justify-content:center;padding:1rem}
.lightbox figure{text-align:center;max-width:90vw;max-height:90vh}
.lightbox img{max-width:100%;max-height:80vh;object-fit:contain;border-radius:4px}
.lightbox figcaption{margin-top:1rem;font-size:.9rem}
.lb-name{display:block;color:#fff}
.lb-pos{display:block;color:#8a8a92}
.lb-close{position:absolute;top:1rem;right:1.5rem;font-size:2rem;color:#fff}
.lb-nav{position:absolute;top:50%;transform:translateY(-50%);font-size:2.5rem;color:#fff;padding:1rem}
.lb-prev{left:1rem}
.lb-next{right:1rem}
"#;

/// Page script: keyboard shortcuts for the lightbox and the sentinel
/// observer that appends the next batch of tiles.
///
/// After each batch every tile link is moved to the new `shown` depth, so a
/// lightbox opened from an earlier tile covers everything on screen.
pub const SCRIPT: &str = r#"
(function(){
  var lb=document.getElementById('lightbox');
  if(lb){
    document.addEventListener('keydown',function(e){
      var target={ArrowRight:lb.dataset.next,ArrowLeft:lb.dataset.prev,Escape:lb.dataset.close}[e.key];
      if(target){e.preventDefault();location.replace(target);}
    });
  }
  var sentinel=document.getElementById('sentinel');
  var grid=document.getElementById('grid');
  if(!sentinel||!grid||!('IntersectionObserver' in window))return;
  var busy=false;
  var observer=new IntersectionObserver(function(entries){
    if(busy||!entries.some(function(e){return e.isIntersecting;}))return;
    busy=true;
    fetch(sentinel.dataset.batch).then(function(r){return r.text();}).then(function(html){
      var tpl=document.createElement('template');
      tpl.innerHTML=html;
      var next=tpl.content.getElementById('sentinel-next');
      tpl.content.querySelectorAll('.tile').forEach(function(t){grid.appendChild(t);});
      if(next){
        var page=next.dataset.page;
        history.replaceState(null,'',page);
        var shown=/shown=\d+/.exec(page);
        if(shown){
          grid.querySelectorAll('.tile').forEach(function(t){
            t.setAttribute('href',t.getAttribute('href').replace(/shown=\d+/,shown[0]));
          });
        }
      }
      if(next&&next.dataset.batch){sentinel.dataset.batch=next.dataset.batch;busy=false;}
      else{observer.disconnect();sentinel.remove();}
    }).catch(function(){busy=false;});
  },{rootMargin:'400px'});
  observer.observe(sentinel);
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_moves_tile_links_to_new_depth() {
        assert!(SCRIPT.contains("history.replaceState(null,'',page)"));
        assert!(SCRIPT.contains("grid.querySelectorAll('.tile')"));
        assert!(SCRIPT.contains(r"replace(/shown=\d+/,shown[0])"));
    }

    #[test]
    fn test_script_keys() {
        for key in ["ArrowRight", "ArrowLeft", "Escape"] {
            assert!(SCRIPT.contains(key));
        }
    }
}
